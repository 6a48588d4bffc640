// Library interface for listing_scraper
// The binary and the integration tests drive the extractor through it

pub mod browser;
pub mod config;
pub mod extractor;
pub mod logging;
pub mod models;
