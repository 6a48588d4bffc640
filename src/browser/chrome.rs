use super::manager::BrowserError;
use super::session::{BrowserSession, PageElement};
use headless_chrome::browser::tab::NoElementFound;
use headless_chrome::util::Timeout;
use headless_chrome::{Browser, Element, Tab};
use std::sync::Arc;
use std::time::Duration;

/// A Chrome tab together with the browser process that owns it
pub struct ChromeSession {
    browser: Option<Browser>,
    tab: Option<Arc<Tab>>,
}

impl ChromeSession {
    pub(crate) fn new(browser: Browser, tab: Arc<Tab>) -> Self {
        Self {
            browser: Some(browser),
            tab: Some(tab),
        }
    }

    fn tab(&self) -> Result<&Arc<Tab>, BrowserError> {
        self.tab.as_ref().ok_or(BrowserError::Released)
    }

    /// Whether `release` has already run
    pub fn is_released(&self) -> bool {
        self.browser.is_none()
    }
}

/// An element living in a [`ChromeSession`] tab
pub struct ChromeElement<'a>(Element<'a>);

/// A selector with no match can surface as `NoElementFound`; that is an
/// empty result, not a failure.
fn elements_or_empty<'a>(
    result: anyhow::Result<Vec<Element<'a>>>,
    selector: &str,
) -> Result<Vec<ChromeElement<'a>>, BrowserError> {
    match result {
        Ok(elements) => Ok(elements.into_iter().map(ChromeElement).collect()),
        Err(e) if e.downcast_ref::<NoElementFound>().is_some() => Ok(Vec::new()),
        Err(e) => Err(BrowserError::QueryError(format!("{}: {}", selector, e))),
    }
}

/// Only an expired wait is a timeout; a broken connection is not.
fn wait_error(selector: &str, timeout: Duration, e: anyhow::Error) -> BrowserError {
    if e.downcast_ref::<Timeout>().is_some() || e.downcast_ref::<NoElementFound>().is_some() {
        BrowserError::Timeout(format!("{} ({:?})", selector, timeout))
    } else {
        BrowserError::QueryError(format!("waiting for {}: {}", selector, e))
    }
}

impl<'a> PageElement for ChromeElement<'a> {
    fn query_all(&self, selector: &str) -> Result<Vec<Self>, BrowserError> {
        elements_or_empty(self.0.find_elements(selector), selector)
    }

    fn inner_text(&self) -> Result<String, BrowserError> {
        self.0
            .get_inner_text()
            .map_err(|e| BrowserError::ReadError(format!("innerText: {}", e)))
    }

    fn attribute(&self, name: &str) -> Result<Option<String>, BrowserError> {
        self.0
            .get_attribute_value(name)
            .map_err(|e| BrowserError::ReadError(format!("attribute {}: {}", name, e)))
    }
}

impl BrowserSession for ChromeSession {
    type Element<'a> = ChromeElement<'a>
    where
        Self: 'a;

    fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        let tab = self.tab()?;

        tab.navigate_to(url).map_err(|e| {
            BrowserError::NavigationError(format!("Failed to navigate to {}: {}", url, e))
        })?;

        tab.wait_until_navigated().map_err(|e| {
            BrowserError::NavigationError(format!("Navigation timeout for {}: {}", url, e))
        })?;

        Ok(())
    }

    fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<(), BrowserError> {
        self.tab()?
            .wait_for_element_with_custom_timeout(selector, timeout)
            .map(|_| ())
            .map_err(|e| wait_error(selector, timeout, e))
    }

    fn locate_all<'a>(&'a self, selector: &str) -> Result<Vec<ChromeElement<'a>>, BrowserError> {
        elements_or_empty(self.tab()?.find_elements(selector), selector)
    }

    fn release(&mut self) -> Result<(), BrowserError> {
        let closed = match self.tab.take() {
            Some(tab) => tab
                .close(true)
                .map(|_| ())
                .map_err(|e| BrowserError::ReleaseError(e.to_string())),
            None => Ok(()),
        };

        // Dropping the last Browser handle kills the Chrome process
        if self.browser.take().is_some() {
            log::debug!("Chrome process released");
        }

        closed
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            log::warn!("Failed to release browser session: {}", e);
        }
    }
}
