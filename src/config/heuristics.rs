//! Fixed keyword, path-pattern, and filter tables
//!
//! Everything the classifier and extractor match against lives here as plain
//! data, handed to the controller at startup. None of it is configurable at
//! runtime; the tables exist as a value so the matching code stays free of
//! ambient globals.

/// Heuristic tables driving page classification and event extraction
#[derive(Debug, Clone)]
pub struct Heuristics {
    /// Words that mark event-related content in titles, headings, and
    /// class/id attributes
    pub event_keywords: &'static [&'static str],

    /// URL path fragments that mark event listing pages
    pub event_path_patterns: &'static [&'static str],

    /// Class/id fragments that mark one event inside a listing container
    pub subitem_markers: &'static [&'static str],

    /// Class/id fragments that mark a title element
    pub title_class_hints: &'static [&'static str],

    /// Class/id fragments that mark a date/time element
    pub datetime_class_hints: &'static [&'static str],

    /// Inline markers that precede date/time text
    pub datetime_markers: &'static [&'static str],

    /// Class/id fragments that mark a location element
    pub location_class_hints: &'static [&'static str],

    /// Inline markers that precede location text
    pub location_markers: &'static [&'static str],

    /// Class/id fragments that mark a description element
    pub description_class_hints: &'static [&'static str],

    /// Headings that are navigation chrome, never event titles
    pub nav_headings: &'static [&'static str],

    /// Domain substring whose candidates get the calendar-noise filter
    pub filtered_domain: &'static str,

    /// Title fragments produced by calendar UI widgets rather than events
    pub calendar_noise: &'static [&'static str],
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            event_keywords: &[
                "event",
                "events",
                "workshop",
                "webinar",
                "conference",
                "seminar",
                "meeting",
                "meetup",
                "calendar",
                "upcoming",
                "schedule",
                "register",
                "registration",
                "attend",
                "join us",
            ],
            event_path_patterns: &[
                "/event",
                "/events",
                "/calendar",
                "/upcoming",
                "/schedule",
                "/workshop",
                "/webinar",
            ],
            subitem_markers: &["event", "item", "card", "entry"],
            title_class_hints: &["title", "name", "headline"],
            datetime_class_hints: &["date", "time", "when"],
            datetime_markers: &["date:", "when:", "time:"],
            location_class_hints: &["location", "venue", "place", "where"],
            location_markers: &["location:", "venue:", "place:", "where:"],
            description_class_hints: &["desc", "content", "text", "detail"],
            nav_headings: &["menu", "navigation", "main menu"],
            filtered_domain: "groundworkcolorado.org",
            calendar_noise: &[
                "0 events",
                "sun",
                "mon",
                "tue",
                "wed",
                "thu",
                "fri",
                "sat",
                "events,",
                "event search",
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_paths_are_lowercase() {
        let heuristics = Heuristics::default();
        for pattern in heuristics.event_path_patterns {
            assert_eq!(*pattern, pattern.to_lowercase());
            assert!(pattern.starts_with('/'));
        }
    }

    #[test]
    fn test_keyword_tables_nonempty() {
        let heuristics = Heuristics::default();
        assert!(!heuristics.event_keywords.is_empty());
        assert!(!heuristics.subitem_markers.is_empty());
        assert!(!heuristics.calendar_noise.is_empty());
    }
}
