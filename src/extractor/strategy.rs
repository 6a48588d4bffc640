//! Prioritized lookup chains for a single field.
//!
//! Each [`Lookup`] yields `Ok(None)` when its element is absent, so missing
//! markup falls through to the next lookup and finally to the chain's
//! default. A present element always yields its value, blank or not. Only
//! real browser failures surface as errors.

use crate::browser::{BrowserError, PageElement};

/// One way of finding a field's value inside an item element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Trimmed text of the first descendant matching `selector`
    Text { selector: String },

    /// Trimmed text of `value_selector` inside the first `label_selector`
    /// element whose text contains `label`.
    ///
    /// Portable form of `label_selector:has-text(label) > span`.
    LabelledText {
        label_selector: String,
        label: String,
        value_selector: String,
    },

    /// Literal value of `attribute` on the first descendant matching `selector`
    Attribute { selector: String, attribute: String },
}

impl Lookup {
    pub fn apply<E: PageElement>(&self, element: &E) -> Result<Option<String>, BrowserError> {
        match self {
            Lookup::Text { selector } => match element.query_first(selector)? {
                Some(found) => Ok(Some(found.inner_text()?.trim().to_string())),
                None => Ok(None),
            },
            Lookup::LabelledText {
                label_selector,
                label,
                value_selector,
            } => {
                for candidate in element.query_all(label_selector)? {
                    if !candidate.inner_text()?.contains(label.as_str()) {
                        continue;
                    }
                    if let Some(value) = candidate.query_first(value_selector)? {
                        return Ok(Some(value.inner_text()?.trim().to_string()));
                    }
                }
                Ok(None)
            }
            Lookup::Attribute {
                selector,
                attribute,
            } => match element.query_first(selector)? {
                Some(found) => found.attribute(attribute),
                None => Ok(None),
            },
        }
    }

    fn describe(&self) -> &str {
        match self {
            Lookup::Text { selector } => selector.as_str(),
            Lookup::LabelledText { label_selector, .. } => label_selector.as_str(),
            Lookup::Attribute { attribute, .. } => attribute.as_str(),
        }
    }
}

/// Ordered lookups with a fallback value
#[derive(Debug, Clone)]
pub struct FallbackChain {
    field: &'static str,
    lookups: Vec<Lookup>,
    default: String,
}

impl FallbackChain {
    pub fn new(field: &'static str, default: impl Into<String>) -> Self {
        Self {
            field,
            lookups: Vec::new(),
            default: default.into(),
        }
    }

    /// Append a lookup, tried after every lookup already in the chain
    pub fn then(mut self, lookup: Lookup) -> Self {
        self.lookups.push(lookup);
        self
    }

    /// Value of the first lookup whose element is present, else the default
    pub fn resolve<E: PageElement>(&self, element: &E) -> Result<String, BrowserError> {
        for lookup in &self.lookups {
            if let Some(value) = lookup.apply(element)? {
                log::debug!("{} resolved via {}", self.field, lookup.describe());
                return Ok(value);
            }
        }

        log::debug!("{} fell back to default", self.field);
        Ok(self.default.clone())
    }

    pub fn lookups(&self) -> &[Lookup] {
        &self.lookups
    }
}
