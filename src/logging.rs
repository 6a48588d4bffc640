use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::Path;

/// log4rs configuration file looked up in the working directory
pub const LOG_CONFIG_PATH: &str = "log4rs.yml";

const CONSOLE_PATTERN: &str = "[{d(%Y-%m-%dT%H:%M:%S%.3f)}] {h({l}):<5} {m}{n}";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Invalid logging configuration: {0}")]
    Config(String),

    #[error("Logger already initialized: {0}")]
    SetLogger(#[from] log::SetLoggerError),
}

/// Initialize logging from `log4rs.yml`, or a stderr console logger at
/// `Info` when that file is absent or unusable.
///
/// Logs go to stderr so stdout carries only the report.
pub fn init() -> Result<(), LoggingError> {
    if Path::new(LOG_CONFIG_PATH).exists() {
        match log4rs::init_file(LOG_CONFIG_PATH, Default::default()) {
            Ok(()) => return Ok(()),
            // no logger is installed yet
            Err(e) => eprintln!("Ignoring {}: {}", LOG_CONFIG_PATH, e),
        }
    }

    log4rs::init_config(console_config(LevelFilter::Info)?)?;
    Ok(())
}

/// Console-only configuration used when no config file is available
pub fn console_config(level: LevelFilter) -> Result<Config, LoggingError> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(CONSOLE_PATTERN)))
        .build();

    Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))
        .map_err(|e| LoggingError::Config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_config_builds() {
        let config = console_config(LevelFilter::Debug).unwrap();
        assert_eq!(config.root().level(), LevelFilter::Debug);
        assert_eq!(config.appenders().len(), 1);
    }
}
