//! Container heuristic: event listings advertised through class/id naming

use super::{class_id_matches, element};
use crate::config::Heuristics;
use crate::records::EventCandidate;
use scraper::{Html, Selector};
use url::Url;

/// Finds block elements whose class or id carries an event keyword and
/// extracts one candidate per contained event.
///
/// A matching container holding sub-elements that look like individual
/// entries (class/id with event/item/card/entry) yields one candidate per
/// sub-element; otherwise the container is extracted as a single event.
/// List items are always treated as single events.
pub fn extract(page: &Html, page_url: &Url, heuristics: &Heuristics) -> Vec<EventCandidate> {
    let mut events = Vec::new();

    let container_sel = match Selector::parse("div, article, section, li") {
        Ok(sel) => sel,
        Err(_) => return events,
    };
    let subitem_sel = match Selector::parse("div, article, li") {
        Ok(sel) => sel,
        Err(_) => return events,
    };

    for container in page.select(&container_sel) {
        if !class_id_matches(container, heuristics.event_keywords) {
            continue;
        }

        if container.value().name() == "li" {
            events.extend(element::extract_single(container, page_url, heuristics));
            continue;
        }

        let sub_items: Vec<_> = container
            .select(&subitem_sel)
            .filter(|item| class_id_matches(*item, heuristics.subitem_markers))
            .collect();

        if sub_items.is_empty() {
            events.extend(element::extract_single(container, page_url, heuristics));
        } else {
            for item in sub_items {
                events.extend(element::extract_single(item, page_url, heuristics));
            }
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_from(html: &str) -> Vec<EventCandidate> {
        let page = Html::parse_document(html);
        let page_url = Url::parse("https://example.com/events").unwrap();
        extract(&page, &page_url, &Heuristics::default())
    }

    #[test]
    fn test_container_without_subitems_is_one_event() {
        let html = r#"<div class="upcoming-workshop">
            <h2>Composting Basics Workshop</h2>
            <p>When: 05/18/2024 10:00 am</p>
        </div>"#;

        let events = extract_from(html);
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].title.as_deref(),
            Some("Composting Basics Workshop")
        );
    }

    #[test]
    fn test_subitems_yield_one_candidate_each() {
        let html = r#"<section id="events">
            <div class="listing-item"><h3>Garden Volunteer Day</h3></div>
            <div class="listing-item"><h3>Youth Green Team Meeting</h3></div>
        </section>"#;

        let events = extract_from(html);
        let titles: Vec<_> = events.iter().filter_map(|e| e.title.as_deref()).collect();
        assert!(titles.contains(&"Garden Volunteer Day"));
        assert!(titles.contains(&"Youth Green Team Meeting"));
    }

    #[test]
    fn test_list_item_container() {
        let html = r#"<ul>
            <li class="event"><strong>Neighborhood Tree Walk and Talk</strong></li>
        </ul>"#;

        let events = extract_from(html);
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].title.as_deref(),
            Some("Neighborhood Tree Walk and Talk")
        );
    }

    #[test]
    fn test_unmarked_containers_ignored() {
        let html = r#"<div class="hero-banner"><h1>Welcome to our site</h1></div>"#;
        assert!(extract_from(html).is_empty());
    }

    #[test]
    fn test_candidates_without_titles_dropped() {
        let html = r#"<div class="event"><p>A date without any heading: 03/05/2024</p></div>"#;
        assert!(extract_from(html).is_empty());
    }
}
