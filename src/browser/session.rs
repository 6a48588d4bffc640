//! Capability traits for the browser collaborator.
//!
//! Extraction code is written against these traits only, so it can be driven
//! by a real Chrome tab ([`ChromeSession`](super::ChromeSession)) or by an
//! in-memory fake in tests.

use super::manager::BrowserError;
use std::time::Duration;

/// A DOM element that can be queried and read
pub trait PageElement: Sized {
    /// Every descendant matching `selector`, in document order.
    ///
    /// No match is an empty vector, not an error.
    fn query_all(&self, selector: &str) -> Result<Vec<Self>, BrowserError>;

    /// Rendered text of the element
    fn inner_text(&self) -> Result<String, BrowserError>;

    /// Value of attribute `name`, or `None` when the element doesn't carry it
    fn attribute(&self, name: &str) -> Result<Option<String>, BrowserError>;

    /// First descendant matching `selector`
    fn query_first(&self, selector: &str) -> Result<Option<Self>, BrowserError> {
        Ok(self.query_all(selector)?.into_iter().next())
    }
}

/// A live page plus the browser process behind it
pub trait BrowserSession {
    type Element<'a>: PageElement
    where
        Self: 'a;

    /// Navigate to `url` and block until the navigation settles
    fn navigate(&self, url: &str) -> Result<(), BrowserError>;

    /// Block until `selector` matches, or fail with [`BrowserError::Timeout`]
    fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<(), BrowserError>;

    /// Every element on the page matching `selector`
    fn locate_all<'a>(&'a self, selector: &str) -> Result<Vec<Self::Element<'a>>, BrowserError>;

    /// Terminate the session. Calling it again is a no-op.
    fn release(&mut self) -> Result<(), BrowserError>;
}
