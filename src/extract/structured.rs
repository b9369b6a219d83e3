//! Structured-data extraction: schema.org Event objects in JSON-LD blocks

use crate::parse::parse_date_time;
use crate::records::EventCandidate;
use scraper::{Html, Selector};
use serde_json::{Map, Value};
use url::Url;

/// Parses every embedded JSON-LD block and collects schema.org Event
/// objects, whether top-level, inside a list, or inside a "@graph" array.
/// A malformed block is skipped without affecting the others.
pub fn extract(page: &Html, page_url: &Url) -> Vec<EventCandidate> {
    let mut events = Vec::new();

    let script_sel = match Selector::parse(r#"script[type="application/ld+json"]"#) {
        Ok(sel) => sel,
        Err(_) => return events,
    };

    for script in page.select(&script_sel) {
        let raw = script.text().collect::<String>();
        let data: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!("Skipping malformed JSON-LD block: {}", err);
                continue;
            }
        };

        if let Some(obj) = data.as_object() {
            if is_event_type(obj) {
                events.extend(from_event_object(obj, page_url));
            } else if let Some(graph) = obj.get("@graph").and_then(Value::as_array) {
                for item in graph {
                    if let Some(event) = item.as_object().filter(|o| is_event_type(o)) {
                        events.extend(from_event_object(event, page_url));
                    }
                }
            }
        } else if let Some(items) = data.as_array() {
            for item in items {
                if let Some(event) = item.as_object().filter(|o| is_event_type(o)) {
                    events.extend(from_event_object(event, page_url));
                }
            }
        }
    }

    events
}

fn is_event_type(obj: &Map<String, Value>) -> bool {
    obj.get("@type").and_then(Value::as_str) == Some("Event")
}

/// Maps a schema.org Event object onto a candidate. Objects without a name
/// yield nothing.
fn from_event_object(obj: &Map<String, Value>, page_url: &Url) -> Option<EventCandidate> {
    let mut event = EventCandidate::new(page_url.as_str());

    event.title = obj
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .filter(|name| !name.is_empty());

    if let Some(start) = obj.get("startDate").and_then(Value::as_str) {
        let (date, time) = parse_date_time(start);
        event.date = date;
        event.time = time;
    }

    event.description = obj
        .get("description")
        .and_then(Value::as_str)
        .map(str::to_string);
    event.location = obj.get("location").and_then(location_from_value);
    event.url = obj
        .get("url")
        .and_then(Value::as_str)
        .and_then(|href| page_url.join(href).ok())
        .map(|joined| joined.to_string());

    event.title.is_some().then_some(event)
}

/// Location is either a plain string, a Place with a name, or a Place with a
/// postal address whose sub-fields get joined by spaces.
fn location_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Object(place) => {
            if let Some(name) = place.get("name").and_then(Value::as_str) {
                return Some(name.to_string());
            }
            match place.get("address") {
                Some(Value::Object(address)) => {
                    let parts: Vec<String> = [
                        "streetAddress",
                        "addressLocality",
                        "addressRegion",
                        "postalCode",
                    ]
                    .iter()
                    .filter_map(|field| address.get(*field))
                    .map(scalar_string)
                    .collect();
                    (!parts.is_empty()).then(|| parts.join(" "))
                }
                Some(other) => Some(scalar_string(other)),
                None => None,
            }
        }
        _ => None,
    }
}

fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
