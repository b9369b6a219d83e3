//! Multi-strategy event extraction engine
//!
//! Three strategies run in order, each additive: container heuristics over
//! class/id naming, embedded JSON-LD structured data, and a page-structure
//! fallback over heading/content pairs. Later strategies only run while the
//! page has produced fewer than three candidates.

mod container;
mod element;
mod fallback;
mod structured;

use crate::config::Heuristics;
use crate::records::EventCandidate;
use scraper::{ElementRef, Html};
use url::Url;

/// Candidate count below which later strategies still run
const STRATEGY_FILL_TARGET: usize = 3;

/// Runs the extraction strategies against a parsed page.
pub fn extract_events(page_url: &Url, page: &Html, heuristics: &Heuristics) -> Vec<EventCandidate> {
    let mut events = container::extract(page, page_url, heuristics);

    if events.len() < STRATEGY_FILL_TARGET {
        events.extend(structured::extract(page, page_url));

        if events.len() < STRATEGY_FILL_TARGET {
            events.extend(fallback::extract(page, page_url, heuristics));
        }
    }

    let domain = page_url.host_str().unwrap_or("").to_lowercase();
    if domain.contains(heuristics.filtered_domain) {
        events.retain(|event| !is_calendar_noise(event, heuristics));
    }

    events
}

/// Calendar-widget chrome masquerading as an event on the filtered site
fn is_calendar_noise(candidate: &EventCandidate, heuristics: &Heuristics) -> bool {
    let title = match candidate.title.as_deref() {
        Some(title) => title,
        None => return true,
    };

    let lower = title.to_lowercase();
    if heuristics
        .calendar_noise
        .iter()
        .any(|noise| lower.contains(noise))
    {
        return true;
    }

    if title.len() < 3 {
        return true;
    }

    let trimmed = title.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit())
}

/// Concatenated text content of an element, trimmed at both ends
pub(crate) fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// True when the element's class or id contains any of the given markers
pub(crate) fn class_id_matches(element: ElementRef, markers: &[&str]) -> bool {
    let class = element.value().attr("class").unwrap_or("");
    let id = element.value().attr("id").unwrap_or("");
    let blob = format!("{} {}", class, id).to_lowercase();
    markers.iter().any(|marker| blob.contains(marker))
}
