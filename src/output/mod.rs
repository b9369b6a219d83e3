//! Run reporting: summary statistics and console output

use crate::records::EventRecord;
use std::collections::BTreeMap;
use std::time::Duration;

/// Summary of a completed scan run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Total pages fetched across all sites
    pub pages_visited: u64,

    /// Total event records produced
    pub total_events: usize,

    /// How many records carry a parsed date
    pub dated_events: usize,

    /// Record counts per trust abbreviation, alphabetical
    pub events_per_trust: Vec<(String, usize)>,

    /// Wall-clock run time
    pub elapsed: Duration,
}

/// Builds the run summary from the final record collection.
pub fn summarize(records: &[EventRecord], pages_visited: u64, elapsed: Duration) -> RunSummary {
    let mut per_trust: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        *per_trust.entry(record.trust_abbrev.clone()).or_default() += 1;
    }

    RunSummary {
        pages_visited,
        total_events: records.len(),
        dated_events: records.iter().filter(|r| r.date.is_some()).count(),
        events_per_trust: per_trust.into_iter().collect(),
        elapsed,
    }
}

/// Prints the end-of-run report to stdout.
pub fn print_summary(summary: &RunSummary, records: &[EventRecord]) {
    println!("\n=== SCAN COMPLETE ===");
    println!("Time taken: {:.2} seconds", summary.elapsed.as_secs_f64());
    println!("Pages visited: {}", summary.pages_visited);
    println!(
        "Total events found: {} ({} with dates)",
        summary.total_events, summary.dated_events
    );

    if !summary.events_per_trust.is_empty() {
        println!("\nEvents per trust:");
        for (abbrev, count) in &summary.events_per_trust {
            println!("  {:<6} {}", abbrev, count);
        }
    }

    if !records.is_empty() {
        println!("\nEvents (soonest first, dateless last):");
        for record in records {
            let date = record
                .date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "----------".to_string());
            let time = record
                .time
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_else(|| "     ".to_string());
            println!("  {} {} [{}] {}", date, time, record.trust_abbrev, record.title);
        }
    }
}
