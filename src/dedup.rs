//! Cross-page, cross-strategy event identity resolution
//!
//! Every candidate with a title gets a stable fingerprint over its
//! (title, date, source_url) triple. A single run-wide set of fingerprints
//! decides which candidates become records: the first occurrence of an
//! identity wins, later duplicates are dropped silently.

use crate::records::EventCandidate;
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Computes the stable identity hash for a candidate.
///
/// Candidates without a title have no identity and are never fingerprinted.
pub fn fingerprint(candidate: &EventCandidate) -> Option<String> {
    let title = candidate.title.as_deref()?;
    let date = candidate
        .date
        .map(|d| d.to_string())
        .unwrap_or_default();

    let key = format!("{}-{}-{}", title, date, candidate.source_url);
    Some(hex::encode(Sha256::digest(key.as_bytes())))
}

/// Outcome of checking a candidate against the run-wide fingerprint set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// First occurrence of this identity; carries the fingerprint when one
    /// exists
    Unique(Option<String>),

    /// Identity already recorded earlier in the run
    Duplicate,
}

/// Run-wide fingerprint set, reset once per full multi-site run
#[derive(Debug, Default)]
pub struct Deduper {
    seen: HashSet<String>,
}

impl Deduper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admits a candidate if its identity has not been seen this run.
    /// Candidates without an identity always pass.
    pub fn admit(&mut self, candidate: &EventCandidate) -> Admission {
        match fingerprint(candidate) {
            None => Admission::Unique(None),
            Some(fp) => {
                if self.seen.insert(fp.clone()) {
                    Admission::Unique(Some(fp))
                } else {
                    Admission::Duplicate
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn candidate(title: Option<&str>, date: Option<NaiveDate>, source: &str) -> EventCandidate {
        EventCandidate {
            title: title.map(str::to_string),
            date,
            source_url: source.to_string(),
            ..EventCandidate::default()
        }
    }

    #[test]
    fn test_first_occurrence_wins() {
        let mut deduper = Deduper::new();
        let date = NaiveDate::from_ymd_opt(2024, 3, 5);
        let first = candidate(Some("Community Cleanup"), date, "https://example.com/events");
        let second = candidate(Some("Community Cleanup"), date, "https://example.com/events");

        assert!(matches!(deduper.admit(&first), Admission::Unique(Some(_))));
        assert_eq!(deduper.admit(&second), Admission::Duplicate);
    }

    #[test]
    fn test_different_source_is_different_identity() {
        let mut deduper = Deduper::new();
        let date = NaiveDate::from_ymd_opt(2024, 3, 5);
        let a = candidate(Some("Community Cleanup"), date, "https://example.com/events");
        let b = candidate(Some("Community Cleanup"), date, "https://example.com/calendar");

        assert!(matches!(deduper.admit(&a), Admission::Unique(Some(_))));
        assert!(matches!(deduper.admit(&b), Admission::Unique(Some(_))));
    }

    #[test]
    fn test_dateless_candidates_still_fingerprinted() {
        let mut deduper = Deduper::new();
        let a = candidate(Some("Community Cleanup"), None, "https://example.com/");
        let b = candidate(Some("Community Cleanup"), None, "https://example.com/");

        assert!(matches!(deduper.admit(&a), Admission::Unique(Some(_))));
        assert_eq!(deduper.admit(&b), Admission::Duplicate);
    }

    #[test]
    fn test_titleless_candidates_always_pass() {
        let mut deduper = Deduper::new();
        let a = candidate(None, None, "https://example.com/");
        let b = candidate(None, None, "https://example.com/");

        assert_eq!(deduper.admit(&a), Admission::Unique(None));
        assert_eq!(deduper.admit(&b), Admission::Unique(None));
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5);
        let a = candidate(Some("Cleanup"), date, "https://example.com/");
        let b = candidate(Some("Cleanup"), date, "https://example.com/");
        assert_eq!(fingerprint(&a), fingerprint(&b));
    }
}
