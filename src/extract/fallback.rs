//! Page-structure fallback: heading + following-sibling content blocks
//!
//! When neither class naming nor structured data gives events away, walk
//! the headings and pair each with the substantial content blocks that
//! follow it. A pair becomes a candidate only when a date turns up or the
//! heading itself reads event-like.

use super::element_text;
use crate::config::Heuristics;
use crate::parse::{parse_date_time, parse_location};
use crate::records::EventCandidate;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Number of content blocks gathered after each heading
const MAX_SIBLING_BLOCKS: usize = 3;

/// Description budget, in characters
const DESCRIPTION_LIMIT: usize = 300;

pub fn extract(page: &Html, page_url: &Url, heuristics: &Heuristics) -> Vec<EventCandidate> {
    let mut events = Vec::new();

    let heading_sel = match Selector::parse("h1, h2, h3, h4") {
        Ok(sel) => sel,
        Err(_) => return events,
    };

    for heading in page.select(&heading_sel) {
        let heading_text = element_text(heading);
        let heading_lower = heading_text.to_lowercase();

        // Skip navigation chrome and stubs
        if heading_text.len() < 5 || heuristics.nav_headings.contains(&heading_lower.as_str()) {
            continue;
        }

        let (mut date, mut time) = parse_date_time(&heading_text);

        let siblings = following_blocks(heading);
        if siblings.is_empty() {
            continue;
        }

        let combined = siblings
            .iter()
            .map(|block| element_text(*block))
            .collect::<Vec<_>>()
            .join(" ");

        if date.is_none() {
            let (content_date, content_time) = parse_date_time(&combined);
            date = content_date;
            time = content_time;
        }

        let keyword_hit = heuristics
            .event_keywords
            .iter()
            .any(|keyword| heading_lower.contains(keyword));

        if date.is_none() && !keyword_hit {
            continue;
        }

        events.push(EventCandidate {
            title: Some(heading_text),
            date,
            time,
            description: Some(truncate_description(&combined)),
            location: parse_location(&combined),
            url: heading_link(heading, &siblings, page_url),
            source_url: page_url.as_str().to_string(),
        });
    }

    events
}

/// Gathers up to three substantial p/div blocks following a heading,
/// walking past anything else in between.
fn following_blocks(heading: ElementRef) -> Vec<ElementRef> {
    let mut blocks = Vec::new();

    for sibling in heading.next_siblings() {
        if blocks.len() >= MAX_SIBLING_BLOCKS {
            break;
        }
        let element = match ElementRef::wrap(sibling) {
            Some(element) => element,
            None => continue,
        };
        let name = element.value().name();
        if (name == "p" || name == "div") && element_text(element).len() > 20 {
            blocks.push(element);
        }
    }

    blocks
}

/// Link from the heading itself, or failing that from the first content
/// block.
fn heading_link(
    heading: ElementRef,
    siblings: &[ElementRef],
    page_url: &Url,
) -> Option<String> {
    let anchor_sel = Selector::parse("a").ok()?;

    let anchor = heading.select(&anchor_sel).next().or_else(|| {
        siblings
            .first()
            .and_then(|block| block.select(&anchor_sel).next())
    });

    let href = anchor?.value().attr("href")?;
    page_url.join(href).ok().map(|joined| joined.to_string())
}

fn truncate_description(text: &str) -> String {
    if text.chars().count() <= DESCRIPTION_LIMIT {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(DESCRIPTION_LIMIT).collect();
    truncated.push_str("...");
    truncated
}
