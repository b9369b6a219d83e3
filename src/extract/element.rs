//! Single-element candidate extraction
//!
//! Shared by the container heuristic: given one element believed to hold a
//! single event, mine its descendants for title, date, location,
//! description, and a link. Every field heuristic is an ordered list of
//! rules; the first hit wins.

use super::{class_id_matches, element_text};
use crate::config::Heuristics;
use crate::parse::{parse_date_time, parse_location};
use crate::records::EventCandidate;
use chrono::{NaiveDate, NaiveTime};
use scraper::{ElementRef, Selector};
use url::Url;

/// Extracts one candidate from an element, or nothing when no usable title
/// is found.
pub fn extract_single(
    element: ElementRef,
    page_url: &Url,
    heuristics: &Heuristics,
) -> Option<EventCandidate> {
    let mut event = EventCandidate::new(page_url.as_str());

    event.title = pick_title(element, heuristics);

    let (date, time) = pick_date_time(element, heuristics);
    event.date = date;
    event.time = time;

    event.location = pick_location(element, heuristics);
    event.description = pick_description(element, event.title.as_deref(), heuristics);
    event.url = pick_link(element, event.title.as_deref(), page_url);

    event.has_usable_title().then_some(event)
}

/// Title candidates carry a priority: headings by prominence (h1 highest),
/// title-ish classes in the middle, long bold runs lowest. The sort is
/// stable, so encounter order breaks ties.
fn pick_title(element: ElementRef, heuristics: &Heuristics) -> Option<String> {
    let mut candidates: Vec<(String, i32)> = Vec::new();

    if let Ok(sel) = Selector::parse("h1, h2, h3, h4, h5") {
        for heading in element.select(&sel) {
            let level = heading_level(heading).unwrap_or(5);
            candidates.push((element_text(heading), 5 - level));
        }
    }

    if let Ok(sel) = Selector::parse("strong, b") {
        for bold in element.select(&sel) {
            let text = element_text(bold);
            if text.len() > 10 {
                candidates.push((text, 1));
            }
        }
    }

    for hinted in descendants_with_class_hint(element, heuristics.title_class_hints) {
        candidates.push((element_text(hinted), 3));
    }

    candidates.sort_by_key(|(_, priority)| std::cmp::Reverse(*priority));
    candidates.into_iter().next().map(|(text, _)| text)
}

fn heading_level(element: ElementRef) -> Option<i32> {
    element.value().name().strip_prefix('h')?.parse().ok()
}

/// Gathers date-ish texts (hinted classes first, then marker paragraphs)
/// and keeps the first that parses; falls back to the whole element's text.
fn pick_date_time(
    element: ElementRef,
    heuristics: &Heuristics,
) -> (Option<NaiveDate>, Option<NaiveTime>) {
    let texts = gather_field_texts(
        element,
        heuristics.datetime_class_hints,
        heuristics.datetime_markers,
    );

    for text in &texts {
        let (date, time) = parse_date_time(text);
        if date.is_some() {
            return (date, time);
        }
    }

    parse_date_time(&element_text(element))
}

/// Same gathering shape as dates, but through the location parser.
fn pick_location(element: ElementRef, heuristics: &Heuristics) -> Option<String> {
    let texts = gather_field_texts(
        element,
        heuristics.location_class_hints,
        heuristics.location_markers,
    );

    for text in &texts {
        if let Some(location) = parse_location(text) {
            return Some(location);
        }
    }

    parse_location(&element_text(element))
}

/// Longest paragraph or description-hinted text over 20 characters that is
/// not an exact title match. Stable ordering: the first of equal lengths
/// wins.
fn pick_description(
    element: ElementRef,
    title: Option<&str>,
    heuristics: &Heuristics,
) -> Option<String> {
    let mut candidates: Vec<String> = Vec::new();

    if let Ok(sel) = Selector::parse("p") {
        for paragraph in element.select(&sel) {
            let text = element_text(paragraph);
            if text.len() > 20 && Some(text.as_str()) != title {
                candidates.push(text);
            }
        }
    }

    for hinted in descendants_with_class_hint(element, heuristics.description_class_hints) {
        let text = element_text(hinted);
        if text.len() > 20 && Some(text.as_str()) != title {
            candidates.push(text);
        }
    }

    candidates.sort_by_key(|text| std::cmp::Reverse(text.len()));
    candidates.into_iter().next()
}

/// Link selection ladder: the element itself when it is an anchor, then an
/// anchor mentioning the title, then a more/details/image anchor, then the
/// first anchor at all.
fn pick_link(element: ElementRef, title: Option<&str>, page_url: &Url) -> Option<String> {
    if element.value().name() == "a" {
        return join_href(element.value().attr("href"), page_url);
    }

    let anchor_sel = Selector::parse("a").ok()?;
    let img_sel = Selector::parse("img").ok()?;

    if let Some(title) = title {
        for anchor in element.select(&anchor_sel) {
            if element_text(anchor).contains(title) {
                return join_href(anchor.value().attr("href"), page_url);
            }
        }
    }

    for anchor in element.select(&anchor_sel) {
        let text = element_text(anchor).to_lowercase();
        if text.contains("more")
            || text.contains("details")
            || anchor.select(&img_sel).next().is_some()
        {
            return join_href(anchor.value().attr("href"), page_url);
        }
    }

    element
        .select(&anchor_sel)
        .next()
        .and_then(|anchor| join_href(anchor.value().attr("href"), page_url))
}

fn join_href(href: Option<&str>, page_url: &Url) -> Option<String> {
    let href = href?;
    page_url.join(href).ok().map(|joined| joined.to_string())
}

/// Texts from descendants whose class/id carries a field hint, followed by
/// texts of block elements whose content carries an inline marker.
fn gather_field_texts(
    element: ElementRef,
    class_hints: &[&str],
    markers: &[&str],
) -> Vec<String> {
    let mut texts: Vec<String> = descendants_with_class_hint(element, class_hints)
        .into_iter()
        .map(element_text)
        .collect();

    if let Ok(sel) = Selector::parse("p, div, span") {
        for block in element.select(&sel) {
            let text = element_text(block);
            let lower = text.to_lowercase();
            if markers.iter().any(|marker| lower.contains(marker)) {
                texts.push(text);
            }
        }
    }

    texts
}

fn descendants_with_class_hint<'a>(
    element: ElementRef<'a>,
    hints: &[&str],
) -> Vec<ElementRef<'a>> {
    match Selector::parse("*") {
        Ok(sel) => element
            .select(&sel)
            .filter(|descendant| class_id_matches(*descendant, hints))
            .collect(),
        Err(_) => Vec::new(),
    }
}
