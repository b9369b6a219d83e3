//! Location extraction from free text

use regex::Regex;
use std::sync::OnceLock;

/// Indicators searched in priority order; "at " deliberately comes first.
const LOCATION_INDICATORS: [&str; 5] = ["at ", "location:", "venue:", "where:", "address:"];

fn chunk_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([^.!?\n]+)").expect("location chunk regex must be valid"))
}

fn address_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"\d+\s+[A-Za-z\s]+(?:Street|St|Avenue|Ave|Road|Rd|Boulevard|Blvd|Lane|Ln|Drive|Dr)(?:[,\s]+[A-Za-z\s]+(?:,\s*[A-Z]{2})?)?",
        )
        .expect("street address regex must be valid")
    })
}

/// Pulls a location string out of free text.
///
/// Searches case-insensitively for indicator substrings and returns the text
/// following the first hit, up to the first sentence terminator or newline.
/// Falls back to a street-address pattern. Returns `None` when neither
/// matches.
pub fn parse_location(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        return None;
    }

    // ASCII lowercasing keeps byte offsets aligned with the original text
    let lower = text.to_ascii_lowercase();

    for indicator in LOCATION_INDICATORS {
        if let Some(idx) = lower.find(indicator) {
            let after = text[idx + indicator.len()..].trim_start();
            if let Some(caps) = chunk_re().captures(after) {
                let chunk = caps[1].trim();
                if !chunk.is_empty() {
                    return Some(chunk.to_string());
                }
            }
        }
    }

    address_re()
        .find(text)
        .map(|m| m.as_str().trim().to_string())
}
