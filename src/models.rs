use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title used when an item has no title anchor
pub const NO_TITLE: &str = "제목 없음";

/// Posting number used when neither id lookup finds a value
pub const NO_ID: &str = "번호 없음";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ListingRecord {
    pub title: String,
    pub id: String,
}

/// An item that was skipped because extraction raised an error
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    /// 1-based position among the discovered items
    pub index: usize,
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Completed,
    /// The listing container never rendered; nothing was extracted
    ContainerMissing,
}

/// Outcome of one scrape run
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScrapeReport {
    pub status: RunStatus,
    pub url: String,
    pub started_at: DateTime<Utc>,
    /// Number of item elements found on the page
    pub discovered: usize,
    pub records: Vec<ListingRecord>,
    pub skipped: Vec<ItemFailure>,
    pub elapsed_ms: u64,
}

impl ScrapeReport {
    pub fn success(&self) -> bool {
        self.status == RunStatus::Completed
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(status: RunStatus) -> ScrapeReport {
        ScrapeReport {
            status,
            url: "https://example.com".to_string(),
            started_at: Utc::now(),
            discovered: 1,
            records: vec![ListingRecord {
                title: "Engineer".to_string(),
                id: "2025001".to_string(),
            }],
            skipped: vec![],
            elapsed_ms: 12,
        }
    }

    #[test]
    fn test_success_follows_status() {
        assert!(report(RunStatus::Completed).success());
        assert!(!report(RunStatus::ContainerMissing).success());
    }

    #[test]
    fn test_report_serializes_status_in_snake_case() {
        let json = serde_json::to_value(report(RunStatus::ContainerMissing)).unwrap();
        assert_eq!(json["status"], "container_missing");
        assert_eq!(json["records"][0]["id"], "2025001");
    }
}
