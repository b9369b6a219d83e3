//! Page classification: decides whether a fetched page is event-related

use crate::config::Heuristics;
use scraper::{Html, Selector};

/// Returns true when the URL, the document title, or any h1-h3 heading
/// signals event content.
pub fn is_event_page(url: &str, page: &Html, heuristics: &Heuristics) -> bool {
    let url_lower = url.to_lowercase();
    if heuristics
        .event_path_patterns
        .iter()
        .any(|pattern| url_lower.contains(pattern))
    {
        return true;
    }

    if let Ok(title_sel) = Selector::parse("title") {
        if let Some(title) = page.select(&title_sel).next() {
            let text = title.text().collect::<String>().to_lowercase();
            if heuristics
                .event_keywords
                .iter()
                .any(|keyword| text.contains(keyword))
            {
                return true;
            }
        }
    }

    if let Ok(heading_sel) = Selector::parse("h1, h2, h3") {
        for heading in page.select(&heading_sel) {
            let text = heading.text().collect::<String>().to_lowercase();
            if heuristics
                .event_keywords
                .iter()
                .any(|keyword| text.contains(keyword))
            {
                return true;
            }
        }
    }

    false
}
