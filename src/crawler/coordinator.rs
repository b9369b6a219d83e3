//! Scan coordinator - main crawl orchestration logic
//!
//! Drives the whole run: one site at a time, one page at a time. Per page:
//! politeness delay, fetch, classify, extract, dedup, link expansion. Any
//! failure is contained to the smallest unit; a bad page skips that page,
//! a bad site skips that site.

use crate::classify::is_event_page;
use crate::config::{Config, Heuristics};
use crate::crawler::fetcher::{build_http_client, fetch_page, politeness_delay};
use crate::crawler::frontier::{CrawlState, QueuedPage};
use crate::dedup::{Admission, Deduper};
use crate::extract::extract_events;
use crate::records::{sort_by_date, EventCandidate, EventRecord, TrustSite};
use crate::ScanError;
use chrono::{DateTime, Utc};
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

/// Link targets skipped during expansion regardless of scope
const SKIPPED_EXTENSIONS: [&str; 3] = [".pdf", ".jpg", ".png"];

/// Drives the whole multi-site scan.
pub struct Scanner {
    config: Config,
    heuristics: Heuristics,
    client: Client,
    deduper: Deduper,
    records: Vec<EventRecord>,
    pages_visited: u64,
    run_started: DateTime<Utc>,
}

/// Everything a finished run produces.
#[derive(Debug)]
pub struct ScanOutcome {
    /// Date-ordered event records (dateless last)
    pub records: Vec<EventRecord>,
    pub pages_visited: u64,
    pub elapsed: Duration,
}

impl Scanner {
    pub fn new(config: Config) -> Result<Self, ScanError> {
        let client = build_http_client(&config.crawler, &config.user_agent)?;

        Ok(Self {
            config,
            heuristics: Heuristics::default(),
            client,
            deduper: Deduper::new(),
            records: Vec::new(),
            pages_visited: 0,
            run_started: Utc::now(),
        })
    }

    /// Runs the scan across every configured site, in order.
    ///
    /// Site failures are contained at the site boundary: the next site
    /// always gets its turn.
    pub async fn run(mut self) -> Result<ScanOutcome, ScanError> {
        let start = std::time::Instant::now();
        tracing::info!("Starting scan of {} sites", self.config.sites.len());

        let sites = self.config.sites.clone();
        for site in &sites {
            tracing::info!("Examining: {}", site);
            if let Err(e) = self.scan_site(site).await {
                tracing::error!("Error processing {}: {}", site, e);
            }
        }

        sort_by_date(&mut self.records);

        let elapsed = start.elapsed();
        tracing::info!(
            "Scan complete: {} pages visited, {} events found in {:.2}s",
            self.pages_visited,
            self.records.len(),
            elapsed.as_secs_f64()
        );

        Ok(ScanOutcome {
            records: self.records,
            pages_visited: self.pages_visited,
            elapsed,
        })
    }

    /// Crawls one site from its root, depth-first, within depth and budget
    /// limits.
    async fn scan_site(&mut self, site_root: &str) -> Result<(), ScanError> {
        let root = Url::parse(site_root)?;
        let root_prefix = root.as_str().to_string();
        let trust = self.trust_for(site_root);
        let mut state = CrawlState::new(root);

        while let Some(page) = state.pop() {
            if page.depth >= self.config.crawler.max_depth {
                continue;
            }

            let url_str = page.url.as_str().to_string();
            if state.is_visited(&url_str) {
                continue;
            }

            // Non-priority links stop recursing once the site has used up
            // its page budget; event-path links keep going.
            if !page.priority && state.visited_count() >= self.config.crawler.page_budget {
                continue;
            }

            state.mark_visited(&url_str);
            self.pages_visited += 1;
            tracing::debug!(
                "Depth {}, pages visited {}: checking {}",
                page.depth,
                self.pages_visited,
                url_str
            );

            tokio::time::sleep(politeness_delay(
                &url_str,
                self.config.crawler.fetch_delay_ms,
            ))
            .await;

            let body = match fetch_page(&self.client, &url_str).await {
                Ok(body) => body,
                Err(e) => {
                    tracing::error!("Error accessing {}: {}", url_str, e);
                    continue;
                }
            };

            let document = Html::parse_document(&body);

            // Event pages always get extracted; at the root, extraction runs
            // even when the page does not read event-like, since homepages
            // often bury event teasers.
            let event_page = is_event_page(&url_str, &document, &self.heuristics);
            if event_page || page.depth == 0 {
                if event_page {
                    tracing::info!("Found likely event page: {}", url_str);
                }
                let candidates = extract_events(&page.url, &document, &self.heuristics);
                if !candidates.is_empty() {
                    tracing::info!("Found {} candidate events on {}", candidates.len(), url_str);
                }
                self.promote(candidates, &trust, &url_str);
            }

            if page.depth < self.config.crawler.max_depth {
                let links = self.collect_links(&document, &page, &root_prefix);
                state.push_links(links);
            }
        }

        Ok(())
    }

    /// Runs candidates through dedup and promotes survivors to records.
    fn promote(&mut self, candidates: Vec<EventCandidate>, trust: &TrustSite, page_url: &str) {
        for candidate in candidates {
            match self.deduper.admit(&candidate) {
                Admission::Duplicate => continue,
                Admission::Unique(fingerprint) => {
                    self.records.push(EventRecord {
                        trust_abbrev: trust.abbreviation.clone(),
                        trust_name: trust.display_name.clone(),
                        trust_site: trust.root_url.clone(),
                        page_url: page_url.to_string(),
                        title: candidate.title.unwrap_or_default(),
                        date: candidate.date,
                        time: candidate.time,
                        location: candidate.location,
                        description: candidate.description,
                        event_url: candidate.url,
                        fingerprint,
                        scan_timestamp: self.run_started,
                    });
                }
            }
        }
    }

    /// Collects same-site outbound links in document order, marking
    /// event-path targets as priority.
    fn collect_links(
        &self,
        document: &Html,
        page: &QueuedPage,
        root_prefix: &str,
    ) -> Vec<QueuedPage> {
        let mut links = Vec::new();

        let anchor_sel = match Selector::parse("a[href]") {
            Ok(sel) => sel,
            Err(_) => return links,
        };

        for anchor in document.select(&anchor_sel) {
            let href = match anchor.value().attr("href") {
                Some(href) => href,
                None => continue,
            };

            if let Some(target) = resolve_link(href, &page.url, root_prefix) {
                let lower = target.as_str().to_lowercase();
                let priority = self
                    .heuristics
                    .event_path_patterns
                    .iter()
                    .any(|pattern| lower.contains(pattern));

                links.push(QueuedPage {
                    url: target,
                    depth: page.depth + 1,
                    priority,
                });
            }
        }

        links
    }

    /// Looks up trust metadata for a crawl root, falling back to the
    /// "unknown" sentinel when the registry has no entry.
    fn trust_for(&self, site_root: &str) -> TrustSite {
        match self.config.trusts.iter().find(|t| t.url == site_root) {
            Some(entry) => TrustSite {
                root_url: site_root.to_string(),
                abbreviation: entry.abbrev.clone(),
                display_name: entry.name.clone(),
            },
            None => {
                tracing::warn!("No trust metadata for {}, using sentinel", site_root);
                TrustSite::unknown(site_root)
            }
        }
    }
}

/// Resolves an href against the current page and applies the crawl scope
/// rules. Returns None for links that must not be followed: off-site
/// targets, fragments, non-web schemes, and binary documents.
fn resolve_link(href: &str, base: &Url, root_prefix: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:") || href.starts_with("mailto:") || href.starts_with("tel:") {
        return None;
    }

    let resolved = base.join(href).ok()?;
    if resolved.fragment().is_some() {
        return None;
    }

    let resolved_str = resolved.as_str();
    if !resolved_str.starts_with(root_prefix) {
        return None;
    }

    if SKIPPED_EXTENSIONS
        .iter()
        .any(|ext| resolved_str.contains(ext))
    {
        return None;
    }

    Some(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/news/").unwrap()
    }

    #[test]
    fn test_resolve_relative_link() {
        let resolved = resolve_link("/events", &base(), "https://example.com/").unwrap();
        assert_eq!(resolved.as_str(), "https://example.com/events");
    }

    #[test]
    fn test_offsite_link_rejected() {
        assert!(resolve_link("https://other.org/events", &base(), "https://example.com/").is_none());
    }

    #[test]
    fn test_scheme_links_rejected() {
        for href in ["javascript:void(0)", "mailto:a@b.com", "tel:+1234567890"] {
            assert!(resolve_link(href, &base(), "https://example.com/").is_none());
        }
    }

    #[test]
    fn test_fragment_links_rejected() {
        assert!(resolve_link("#section", &base(), "https://example.com/").is_none());
        assert!(resolve_link("/page#middle", &base(), "https://example.com/").is_none());
    }

    #[test]
    fn test_binary_extensions_rejected() {
        for href in ["/report.pdf", "/photo.jpg", "/logo.png"] {
            assert!(resolve_link(href, &base(), "https://example.com/").is_none());
        }
    }

    #[test]
    fn test_empty_href_rejected() {
        assert!(resolve_link("   ", &base(), "https://example.com/").is_none());
    }
}
