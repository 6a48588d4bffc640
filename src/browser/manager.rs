use super::chrome::ChromeSession;
use super::config::BrowserConfig;
use headless_chrome::{Browser, LaunchOptions};
use std::ffi::OsString;

/// Launches Chrome and opens the session a scrape run works in
pub struct BrowserManager {
    browser: Browser,
    config: BrowserConfig,
}

impl BrowserManager {
    /// Launch a browser with the given configuration
    pub fn new(config: BrowserConfig) -> Result<Self, BrowserError> {
        let args = config.chrome_args();
        let launch_options = Self::build_launch_options(&config, &args)?;

        log::debug!(
            "Launching Chrome: headless={}, window={}x{}, {} extra args",
            config.headless,
            config.window_size.0,
            config.window_size.1,
            args.len()
        );

        let browser = Browser::new(launch_options)
            .map_err(|e| BrowserError::InitializationError(e.to_string()))?;

        Ok(Self { browser, config })
    }

    /// Build Chrome launch options from our config
    fn build_launch_options<'a>(
        config: &BrowserConfig,
        args: &'a [OsString],
    ) -> Result<LaunchOptions<'a>, BrowserError> {
        LaunchOptions::default_builder()
            .headless(config.headless)
            .window_size(Some(config.window_size))
            .args(args.iter().map(|a| a.as_os_str()).collect())
            .build()
            .map_err(|e| BrowserError::ConfigurationError(e.to_string()))
    }

    /// Open a tab and hand the browser over to a session that owns it.
    ///
    /// Releasing the session closes the tab and terminates the Chrome process.
    pub fn open_session(self) -> Result<ChromeSession, BrowserError> {
        let tab = self
            .browser
            .new_tab()
            .map_err(|e| BrowserError::TabCreationError(e.to_string()))?;

        tab.set_default_timeout(self.config.timeout());

        Ok(ChromeSession::new(self.browser, tab))
    }
}

/// Errors that can occur during browser operations
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("Browser initialization failed: {0}")]
    InitializationError(String),

    #[error("Browser configuration error: {0}")]
    ConfigurationError(String),

    #[error("Tab creation failed: {0}")]
    TabCreationError(String),

    #[error("Navigation error: {0}")]
    NavigationError(String),

    #[error("Timeout waiting for: {0}")]
    Timeout(String),

    #[error("Element query failed: {0}")]
    QueryError(String),

    #[error("Element read failed: {0}")]
    ReadError(String),

    #[error("Session already released")]
    Released,

    #[error("Browser release failed: {0}")]
    ReleaseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_options_build() {
        let config = BrowserConfig::default();
        let args = config.chrome_args();
        let options = BrowserManager::build_launch_options(&config, &args);
        assert!(options.is_ok());
    }

    #[test]
    fn test_stealth_mode_options() {
        let config = BrowserConfig::stealth_mode();
        let args = config.chrome_args();
        let options = BrowserManager::build_launch_options(&config, &args).unwrap();

        assert!(options
            .args
            .iter()
            .any(|arg| arg.to_string_lossy().contains("AutomationControlled")));
    }

    #[test]
    fn test_timeout_error_message() {
        let err = BrowserError::Timeout(".rowWrap".to_string());
        assert_eq!(err.to_string(), "Timeout waiting for: .rowWrap");
    }

    #[test]
    #[ignore] // Requires Chrome to be installed
    fn test_open_session() {
        let manager = BrowserManager::new(BrowserConfig::default()).unwrap();
        assert!(manager.open_session().is_ok());
    }
}
