//! Listing extraction: navigate, wait for the listing to render, then pull a
//! title and posting number out of every item.

pub mod strategy;

pub use strategy::{FallbackChain, Lookup};

use crate::browser::{BrowserError, BrowserSession, PageElement};
use crate::config::ListingConfig;
use crate::models::{ItemFailure, ListingRecord, RunStatus, ScrapeReport, NO_ID, NO_TITLE};
use chrono::Utc;
use std::ops::Deref;
use std::time::Instant;

/// Run-level failures. A missing listing container is not one of these; it
/// is reported through [`RunStatus::ContainerMissing`].
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Navigation failed: {0}")]
    Navigation(#[source] BrowserError),

    #[error("Browser failed while waiting for the listing: {0}")]
    Wait(#[source] BrowserError),

    #[error("Could not enumerate listing items: {0}")]
    Locate(#[source] BrowserError),
}

/// Releases the session when dropped unless it was released explicitly
struct ReleaseGuard<S: BrowserSession> {
    session: S,
    released: bool,
}

impl<S: BrowserSession> ReleaseGuard<S> {
    fn new(session: S) -> Self {
        Self {
            session,
            released: false,
        }
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        log::info!("🔒 브라우저 종료 중...");
        if let Err(e) = self.session.release() {
            log::warn!("Failed to release browser session: {}", e);
        }
    }
}

impl<S: BrowserSession> Deref for ReleaseGuard<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.session
    }
}

impl<S: BrowserSession> Drop for ReleaseGuard<S> {
    fn drop(&mut self) {
        self.release();
    }
}

pub struct ListingExtractor {
    config: ListingConfig,
    title: FallbackChain,
    id: FallbackChain,
}

impl ListingExtractor {
    pub fn new(config: ListingConfig) -> Self {
        let title = FallbackChain::new("title", NO_TITLE).then(Lookup::Text {
            selector: config.title_selector.clone(),
        });

        let id = FallbackChain::new("id", NO_ID)
            .then(Lookup::LabelledText {
                label_selector: config.id_label_selector.clone(),
                label: config.id_label_text.clone(),
                value_selector: config.id_value_selector.clone(),
            })
            .then(Lookup::Attribute {
                selector: config.id_button_selector.clone(),
                attribute: config.id_attribute.clone(),
            });

        Self { config, title, id }
    }

    /// Scrape the configured listing page.
    ///
    /// Takes ownership of the session and releases it exactly once on every
    /// path out of this function. Items whose extraction fails are logged,
    /// collected in [`ScrapeReport::skipped`], and do not stop the run.
    pub fn run<S: BrowserSession>(&self, session: S) -> Result<ScrapeReport, ScrapeError> {
        let started_at = Utc::now();
        let clock = Instant::now();
        let mut session = ReleaseGuard::new(session);

        log::info!("🌐 페이지로 이동 중... {}", self.config.url);
        session
            .navigate(&self.config.url)
            .map_err(ScrapeError::Navigation)?;

        match session.wait_for_selector(&self.config.container_selector, self.config.wait_timeout()) {
            Ok(()) => {}
            Err(e @ BrowserError::Timeout(_)) => {
                log::error!("❌ 공고 리스트를 찾을 수 없습니다. ({})", e);
                session.release();
                return Ok(ScrapeReport {
                    status: RunStatus::ContainerMissing,
                    url: self.config.url.clone(),
                    started_at,
                    discovered: 0,
                    records: Vec::new(),
                    skipped: Vec::new(),
                    elapsed_ms: clock.elapsed().as_millis() as u64,
                });
            }
            Err(e) => return Err(ScrapeError::Wait(e)),
        }

        let (discovered, records, skipped) = {
            let items = session
                .locate_all(&self.config.item_selector)
                .map_err(ScrapeError::Locate)?;
            log::info!("👉 총 {}개의 공고를 발견했습니다.", items.len());

            let limit = self.config.max_items.unwrap_or(items.len());
            if limit < items.len() {
                log::info!("Processing the first {} items only", limit);
            }

            let mut records = Vec::new();
            let mut skipped = Vec::new();

            for (idx, item) in items.iter().take(limit).enumerate() {
                let index = idx + 1;
                match self.extract_item(item) {
                    Ok(record) => {
                        log::info!("[{}] 공고명: {}", index, record.title);
                        log::info!("     공고번호: {}", record.id);
                        records.push(record);
                    }
                    Err(e) => {
                        log::warn!("[{}] 추출 중 오류 발생: {}", index, e);
                        skipped.push(ItemFailure {
                            index,
                            error: e.to_string(),
                        });
                    }
                }
            }

            (items.len(), records, skipped)
        };

        let elapsed_ms = clock.elapsed().as_millis() as u64;
        log::info!(
            "✅ 추출 완료! {}개 수집, {}개 건너뜀 (소요시간: {:.2}초)",
            records.len(),
            skipped.len(),
            elapsed_ms as f64 / 1000.0
        );
        session.release();

        Ok(ScrapeReport {
            status: RunStatus::Completed,
            url: self.config.url.clone(),
            started_at,
            discovered,
            records,
            skipped,
            elapsed_ms,
        })
    }

    /// Title and posting number of one item
    pub fn extract_item<E: PageElement>(&self, item: &E) -> Result<ListingRecord, BrowserError> {
        Ok(ListingRecord {
            title: self.title.resolve(item)?,
            id: self.id.resolve(item)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chains_follow_config() {
        let extractor = ListingExtractor::new(ListingConfig::default());
        assert_eq!(
            extractor.title.lookups(),
            &[Lookup::Text {
                selector: ".jobTitWrap a.tit".to_string()
            }]
        );
        assert_eq!(extractor.id.lookups().len(), 2);
        assert!(matches!(
            &extractor.id.lookups()[1],
            Lookup::Attribute { attribute, .. } if attribute == "data-gno"
        ));
    }

    #[test]
    fn test_scrape_error_display() {
        let err = ScrapeError::Navigation(BrowserError::NavigationError("offline".to_string()));
        assert_eq!(err.to_string(), "Navigation failed: Navigation error: offline");
    }
}
