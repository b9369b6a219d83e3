//! Event data model: trust metadata, extraction candidates, final records

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

/// One organization site under scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrustSite {
    pub root_url: String,
    pub abbreviation: String,
    pub display_name: String,
}

impl TrustSite {
    /// Sentinel metadata for crawl roots missing from the trust registry
    pub fn unknown(root_url: &str) -> Self {
        Self {
            root_url: root_url.to_string(),
            abbreviation: "UNK".to_string(),
            display_name: "Unknown".to_string(),
        }
    }
}

/// Unverified extraction result pending validity and dedup checks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventCandidate {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub url: Option<String>,
    /// The page the candidate was extracted from
    pub source_url: String,
}

impl EventCandidate {
    pub fn new(source_url: &str) -> Self {
        Self {
            source_url: source_url.to_string(),
            ..Self::default()
        }
    }

    /// A candidate is only worth keeping when it carries a non-trivial title.
    pub fn has_usable_title(&self) -> bool {
        self.title.as_deref().is_some_and(|t| t.len() > 3)
    }
}

/// Finalized, deduplicated, trust-annotated event
#[derive(Debug, Clone, Serialize)]
pub struct EventRecord {
    pub trust_abbrev: String,
    pub trust_name: String,
    pub trust_site: String,
    pub page_url: String,
    pub title: String,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub event_url: Option<String>,
    pub fingerprint: Option<String>,
    pub scan_timestamp: DateTime<Utc>,
}

/// Sorts records ascending by date. Dateless records sort last via a
/// far-future sentinel, ten years past the current one.
pub fn sort_by_date(records: &mut [EventRecord]) {
    let sentinel = dateless_sentinel(Utc::now().year());
    records.sort_by_key(|record| record.date.unwrap_or(sentinel));
}

fn dateless_sentinel(current_year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(current_year + 10, 12, 31).unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, date: Option<NaiveDate>) -> EventRecord {
        EventRecord {
            trust_abbrev: "EX".to_string(),
            trust_name: "Example".to_string(),
            trust_site: "https://example.com/".to_string(),
            page_url: "https://example.com/events".to_string(),
            title: title.to_string(),
            date,
            time: None,
            location: None,
            description: None,
            event_url: None,
            fingerprint: None,
            scan_timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_dateless_records_sort_last() {
        let mut records = vec![
            record("may", NaiveDate::from_ymd_opt(2024, 5, 1)),
            record("undated", None),
            record("january", NaiveDate::from_ymd_opt(2024, 1, 10)),
        ];

        sort_by_date(&mut records);

        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["january", "may", "undated"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5);
        let mut records = vec![record("first", date), record("second", date)];

        sort_by_date(&mut records);

        assert_eq!(records[0].title, "first");
        assert_eq!(records[1].title, "second");
    }

    #[test]
    fn test_unknown_trust_sentinel() {
        let trust = TrustSite::unknown("https://nowhere.example/");
        assert_eq!(trust.abbreviation, "UNK");
        assert_eq!(trust.display_name, "Unknown");
    }

    #[test]
    fn test_usable_title_requires_length() {
        let mut candidate = EventCandidate::new("https://example.com/");
        assert!(!candidate.has_usable_title());

        candidate.title = Some("Gala".to_string());
        assert!(!candidate.has_usable_title());

        candidate.title = Some("Garden Gala".to_string());
        assert!(candidate.has_usable_title());
    }
}
