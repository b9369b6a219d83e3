//! Crawl controller: coordinator, fetcher, and per-site frontier state

pub mod coordinator;
pub mod fetcher;
pub mod frontier;

pub use coordinator::{ScanOutcome, Scanner};
pub use fetcher::{build_http_client, fetch_page, politeness_delay};
pub use frontier::{CrawlState, QueuedPage};

use crate::config::Config;
use crate::ScanError;

/// Runs a full scan with the given configuration.
pub async fn run_scan(config: Config) -> Result<ScanOutcome, ScanError> {
    let scanner = Scanner::new(config)?;
    scanner.run().await
}
