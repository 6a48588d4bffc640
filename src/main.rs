use listing_scraper::browser::BrowserManager;
use listing_scraper::config::Config;
use listing_scraper::extractor::ListingExtractor;
use listing_scraper::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init()?;

    let cfg = Config::load();
    let browser_config = cfg.browser.to_browser_config();

    log::info!("Listing scraper configured:");
    log::info!("  URL: {}", cfg.listing.url);
    log::info!("  Container wait: {}s", cfg.listing.wait_timeout_secs);
    log::info!("  Headless: {}", browser_config.headless);

    log::info!("🌐 브라우저 시작 중...");
    let session = BrowserManager::new(browser_config)?.open_session()?;

    let report = ListingExtractor::new(cfg.listing).run(session)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.success() {
        std::process::exit(1);
    }

    Ok(())
}
