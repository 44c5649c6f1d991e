//! Textual rewrite of XMLTV timestamp offsets
//!
//! XMLTV timestamps look like `20240101120000 +0500`. Rewriting keeps the
//! fourteen date-time digits exactly as they are and swaps only the offset
//! token, so the wall-clock time stays put. No calendar arithmetic happens.

use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

fn timestamp_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| match Regex::new(r"^(\d{14})\s+[+-]\d{4}") {
            Ok(re) => Some(re),
            Err(e) => {
                warn!("Timestamp pattern failed to compile, offsets left untouched: {}", e);
                None
            }
        })
        .as_ref()
}

/// Replace the offset of `timestamp` with `new_offset`
///
/// A timestamp without a recognisable offset gets `new_offset` appended
/// after a single space. Anything after the offset token is dropped.
///
/// # Examples
///
/// ```rust
/// use epg_merger::pipeline::offset::normalize;
///
/// assert_eq!(normalize("20240101120000 +0500", "-0300"), "20240101120000 -0300");
/// assert_eq!(normalize("20240101120000", "+0000"), "20240101120000 +0000");
/// ```
pub fn normalize(timestamp: &str, new_offset: &str) -> String {
    let Some(pattern) = timestamp_pattern() else {
        return timestamp.to_string();
    };

    match pattern.captures(timestamp).and_then(|caps| caps.get(1)) {
        Some(datetime) => format!("{} {}", datetime.as_str(), new_offset),
        None => format!("{} {}", timestamp, new_offset),
    }
}
