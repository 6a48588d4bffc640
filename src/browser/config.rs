use std::ffi::OsString;
use std::time::Duration;

/// Flags that hide the most obvious automation fingerprints
const STEALTH_FLAGS: [&str; 3] = [
    "--disable-blink-features=AutomationControlled",
    "--disable-dev-shm-usage",
    "--no-sandbox",
];

/// Configuration for the Chrome instance backing a scrape run
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,

    /// Browser window size
    pub window_size: (u32, u32),

    /// Custom user agent
    pub user_agent: Option<String>,

    /// Navigation timeout in seconds
    pub timeout_seconds: u64,

    /// Disable image loading for performance
    pub disable_images: bool,

    /// Additional Chrome flags
    pub chrome_flags: Vec<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_size: (1920, 1080),
            user_agent: Some(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36"
                    .to_string(),
            ),
            timeout_seconds: 30,
            disable_images: true,
            chrome_flags: vec![],
        }
    }
}

impl BrowserConfig {
    /// Create a configuration with the anti-bot flags enabled
    pub fn stealth_mode() -> Self {
        let mut config = Self::default();
        config.enable_stealth();
        config
    }

    /// Append the stealth flags that are not already present
    pub fn enable_stealth(&mut self) {
        for flag in STEALTH_FLAGS {
            if !self.chrome_flags.iter().any(|f| f == flag) {
                self.chrome_flags.push(flag.to_string());
            }
        }
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Full Chrome argument list derived from this config
    pub(crate) fn chrome_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.chrome_flags.iter().map(OsString::from).collect();

        if self.disable_images {
            args.push("--blink-settings=imagesEnabled=false".into());
        }

        if let Some(ua) = &self.user_agent {
            args.push(format!("--user-agent={}", ua).into());
        }

        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BrowserConfig::default();
        assert!(config.headless);
        assert_eq!(config.window_size, (1920, 1080));
        assert!(config.user_agent.is_some());
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_stealth_mode() {
        let config = BrowserConfig::stealth_mode();
        assert!(config
            .chrome_flags
            .iter()
            .any(|f| f.contains("AutomationControlled")));
    }

    #[test]
    fn test_enable_stealth_is_idempotent() {
        let mut config = BrowserConfig::stealth_mode();
        config.enable_stealth();
        assert_eq!(config.chrome_flags.len(), STEALTH_FLAGS.len());
    }

    #[test]
    fn test_chrome_args_include_image_and_agent_flags() {
        let config = BrowserConfig {
            user_agent: Some("TestAgent".to_string()),
            ..BrowserConfig::default()
        };
        let args = config.chrome_args();
        assert!(args.iter().any(|a| a == "--blink-settings=imagesEnabled=false"));
        assert!(args.iter().any(|a| a == "--user-agent=TestAgent"));
    }

    #[test]
    fn test_chrome_args_without_optional_flags() {
        let config = BrowserConfig {
            user_agent: None,
            disable_images: false,
            ..BrowserConfig::default()
        };
        assert!(config.chrome_args().is_empty());
    }
}
