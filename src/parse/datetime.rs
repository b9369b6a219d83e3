//! Date and time extraction from free text
//!
//! Pages express event dates every way imaginable, so parsing is layered:
//! a natural-language pass first, then explicit numeric and textual
//! patterns. Times are normalized to 24-hour clock.

use chrono::{NaiveDate, NaiveTime, Timelike, Utc};
use regex::Regex;
use std::sync::OnceLock;

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex must be valid"))
}

fn time_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(\d{1,2}):(\d{2})(?:\s*(am|pm))?").expect("time regex must be valid")
    })
}

fn numeric_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d{1,2})[/\-](\d{1,2})[/\-](20\d{2})")
            .expect("numeric date regex must be valid")
    })
}

fn textual_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)(january|february|march|april|may|june|july|august|september|october|november|december)\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(20\d{2})",
        )
        .expect("textual date regex must be valid")
    })
}

/// Extracts a calendar date and an optional time of day from free text.
///
/// The natural-language pass runs first; explicit `MM/DD/YYYY` and
/// `Month DD, YYYY` patterns are fallbacks, each followed by a search for
/// an explicit `H:MM[am|pm]` time. Returns `(None, None)` when nothing in
/// the text reads as a date.
pub fn parse_date_time(text: &str) -> (Option<NaiveDate>, Option<NaiveTime>) {
    if text.trim().is_empty() {
        return (None, None);
    }

    let text = whitespace_re().replace_all(text.trim(), " ").into_owned();

    // Natural-language pass. Missing time components default to midnight,
    // in which case an explicit time pattern in the text still counts.
    if let Ok(dt) = dateparser::parse_with(&text, &Utc, NaiveTime::MIN) {
        let time = if dt.hour() != 0 || dt.minute() != 0 {
            NaiveTime::from_hms_opt(dt.hour(), dt.minute(), 0)
        } else {
            find_explicit_time(&text)
        };
        return (Some(dt.date_naive()), time);
    }

    // Numeric MM/DD/YYYY (separators / or -, years starting "20")
    if let Some(caps) = numeric_date_re().captures(&text) {
        if let Some(date) = ymd_from_parts(&caps[3], &caps[1], &caps[2]) {
            return (Some(date), find_explicit_time(&text));
        }
    }

    // Textual "Month DD, YYYY" with optional ordinal suffix
    if let Some(caps) = textual_date_re().captures(&text) {
        let date = month_number(&caps[1]).and_then(|month| {
            let day: u32 = caps[2].parse().ok()?;
            let year: i32 = caps[3].parse().ok()?;
            NaiveDate::from_ymd_opt(year, month, day)
        });
        if let Some(date) = date {
            return (Some(date), find_explicit_time(&text));
        }
    }

    (None, None)
}

fn ymd_from_parts(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn month_number(name: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];

    let lower = name.to_lowercase();
    MONTHS
        .iter()
        .position(|month| *month == lower)
        .map(|index| index as u32 + 1)
}

/// Finds the first explicit `H:MM[am|pm]` pattern and converts it to
/// 24-hour time. PM hours below 12 gain 12.
fn find_explicit_time(text: &str) -> Option<NaiveTime> {
    let caps = time_re().captures(text)?;
    let mut hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;

    if let Some(meridiem) = caps.get(3) {
        if meridiem.as_str().eq_ignore_ascii_case("pm") && hour < 12 {
            hour += 12;
        }
    }

    NaiveTime::from_hms_opt(hour, minute, 0)
}
