//! Browser automation for JavaScript-rendered listing pages
//!
//! Chrome is driven through `headless_chrome`, a blocking API, and exposed to
//! the rest of the crate only through the [`BrowserSession`] and
//! [`PageElement`] traits.
//!
//! # Example
//!
//! ```no_run
//! use listing_scraper::browser::{BrowserConfig, BrowserManager, BrowserSession};
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = BrowserManager::new(BrowserConfig::default())?;
//! let mut session = manager.open_session()?;
//!
//! session.navigate("https://example.com")?;
//! session.wait_for_selector("h1", Duration::from_secs(10))?;
//! println!("Found {} headings", session.locate_all("h1")?.len());
//!
//! session.release()?;
//! # Ok(())
//! # }
//! ```

pub mod chrome;
pub mod config;
pub mod manager;
pub mod session;

// Re-export main types for convenience
pub use chrome::{ChromeElement, ChromeSession};
pub use config::BrowserConfig;
pub use manager::{BrowserError, BrowserManager};
pub use session::{BrowserSession, PageElement};
