use crate::browser::BrowserConfig;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Environment variable that points at an alternative config file
pub const CONFIG_PATH_ENV: &str = "LISTING_SCRAPER_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub browser: BrowserSection,
}

/// What to scrape and how to find it on the page
#[derive(Debug, Deserialize, Clone)]
pub struct ListingConfig {
    #[serde(default = "default_url")]
    pub url: String,

    /// Wraps the whole listing; its appearance means the page rendered
    #[serde(default = "default_container_selector")]
    pub container_selector: String,

    /// One element per job posting
    #[serde(default = "default_item_selector")]
    pub item_selector: String,

    #[serde(default = "default_title_selector")]
    pub title_selector: String,

    /// Elements that may carry the posting number label
    #[serde(default = "default_id_label_selector")]
    pub id_label_selector: String,

    #[serde(default = "default_id_label_text")]
    pub id_label_text: String,

    /// Resolved inside the matching label element
    #[serde(default = "default_id_value_selector")]
    pub id_value_selector: String,

    #[serde(default = "default_id_button_selector")]
    pub id_button_selector: String,

    #[serde(default = "default_id_attribute")]
    pub id_attribute: String,

    /// How long to wait for the container before giving up
    #[serde(default = "default_wait_timeout")]
    pub wait_timeout_secs: u64,

    /// Process at most this many items
    #[serde(default)]
    pub max_items: Option<usize>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BrowserSection {
    #[serde(default = "default_true")]
    pub headless: bool,

    #[serde(default = "default_window_width")]
    pub window_width: u32,

    #[serde(default = "default_window_height")]
    pub window_height: u32,

    #[serde(default)]
    pub user_agent: Option<String>,

    /// Navigation timeout in seconds
    #[serde(default = "default_navigation_timeout")]
    pub navigation_timeout_secs: u64,

    /// Disable images in browser (faster loading)
    #[serde(default = "default_true")]
    pub disable_images: bool,

    /// Add the anti-automation-detection flags
    #[serde(default = "default_true")]
    pub stealth: bool,

    #[serde(default)]
    pub chrome_flags: Vec<String>,
}

fn default_true() -> bool { true }
fn default_url() -> String { "https://www.jobkorea.co.kr/Corp/GIMng/List?PubType=1&SrchStat=1".to_string() }
fn default_container_selector() -> String { ".rowWrap".to_string() }
fn default_item_selector() -> String { ".giListItem".to_string() }
fn default_title_selector() -> String { ".jobTitWrap a.tit".to_string() }
fn default_id_label_selector() -> String { ".date".to_string() }
fn default_id_label_text() -> String { "공고번호".to_string() }
fn default_id_value_selector() -> String { ":scope > span".to_string() }
fn default_id_button_selector() -> String { "button[data-gno]".to_string() }
fn default_id_attribute() -> String { "data-gno".to_string() }
fn default_wait_timeout() -> u64 { 10 }
fn default_window_width() -> u32 { 1920 }
fn default_window_height() -> u32 { 1080 }
fn default_navigation_timeout() -> u64 { 30 }

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            container_selector: default_container_selector(),
            item_selector: default_item_selector(),
            title_selector: default_title_selector(),
            id_label_selector: default_id_label_selector(),
            id_label_text: default_id_label_text(),
            id_value_selector: default_id_value_selector(),
            id_button_selector: default_id_button_selector(),
            id_attribute: default_id_attribute(),
            wait_timeout_secs: default_wait_timeout(),
            max_items: None,
        }
    }
}

impl Default for BrowserSection {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            user_agent: None,
            navigation_timeout_secs: 30,
            disable_images: true,
            stealth: true,
            chrome_flags: vec![],
        }
    }
}

impl ListingConfig {
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Config {
    /// Load `config.toml` (or the file named by `LISTING_SCRAPER_CONFIG`),
    /// falling back to defaults when it is missing or invalid
    pub fn load() -> Self {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let path = Path::new(&path);

        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::from_path(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

impl BrowserSection {
    /// Create a browser configuration from this section
    pub fn to_browser_config(&self) -> BrowserConfig {
        let defaults = BrowserConfig::default();
        let mut config = BrowserConfig {
            headless: self.headless,
            window_size: (self.window_width, self.window_height),
            user_agent: self.user_agent.clone().or(defaults.user_agent),
            timeout_seconds: self.navigation_timeout_secs,
            disable_images: self.disable_images,
            chrome_flags: self.chrome_flags.clone(),
        };

        if self.stealth {
            config.enable_stealth();
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_uses_defaults() {
        let cfg = Config::from_toml_str("").unwrap();
        assert_eq!(cfg.listing.container_selector, ".rowWrap");
        assert_eq!(cfg.listing.item_selector, ".giListItem");
        assert_eq!(cfg.listing.wait_timeout(), Duration::from_secs(10));
        assert_eq!(cfg.listing.max_items, None);
        assert!(cfg.browser.headless);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let cfg = Config::from_toml_str(
            r#"
            [listing]
            url = "https://example.com/jobs"
            max_items = 5

            [browser]
            headless = false
            "#,
        )
        .unwrap();

        assert_eq!(cfg.listing.url, "https://example.com/jobs");
        assert_eq!(cfg.listing.max_items, Some(5));
        assert_eq!(cfg.listing.title_selector, ".jobTitWrap a.tit");
        assert!(!cfg.browser.headless);
        assert!(cfg.browser.disable_images);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let err = Config::from_toml_str("[listing\nurl = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_path() {
        let path = std::env::temp_dir().join(format!("listing-scraper-{}.toml", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[listing]\nwait_timeout_secs = 3").unwrap();

        let cfg = Config::from_path(&path).unwrap();
        assert_eq!(cfg.listing.wait_timeout_secs, 3);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_path_is_io_error() {
        let err = Config::from_path(Path::new("/nonexistent/listing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_browser_section_conversion() {
        let section = BrowserSection {
            window_width: 1280,
            window_height: 720,
            user_agent: Some("Agent".to_string()),
            navigation_timeout_secs: 15,
            ..BrowserSection::default()
        };
        let browser = section.to_browser_config();
        assert_eq!(browser.window_size, (1280, 720));
        assert_eq!(browser.user_agent.as_deref(), Some("Agent"));
        assert_eq!(browser.timeout_seconds, 15);
        assert!(browser
            .chrome_flags
            .iter()
            .any(|f| f.contains("AutomationControlled")));
    }

    #[test]
    fn test_stealth_can_be_disabled() {
        let section = BrowserSection {
            stealth: false,
            ..BrowserSection::default()
        };
        assert!(section.to_browser_config().chrome_flags.is_empty());
    }
}
