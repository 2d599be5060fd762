//! Pure formatting primitives shared by the card renderer and the document
//! generators.

use chrono::{DateTime, NaiveDate};

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// Abbreviate a count for display: `999`, `1.5K`, `1000.0K`, `2.3M`.
///
/// The value is divided first and rounded to one decimal afterwards, so
/// `999_999` renders as `1000.0K` rather than jumping to `1.0M`. Ties round
/// up: `1_250` is `1.3K`.
pub fn format_count(count: u64) -> String {
    if count >= 1_000_000 {
        abbreviate(count, 1_000_000, 'M')
    } else if count >= 1_000 {
        abbreviate(count, 1_000, 'K')
    } else {
        count.to_string()
    }
}

/// `count / unit` rounded half-up to one decimal, in integer tenths.
fn abbreviate(count: u64, unit: u64, suffix: char) -> String {
    let step = unit / 10;
    let tenths = count / step + u64::from(count % step >= step / 2);
    format!("{}.{}{suffix}", tenths / 10, tenths % 10)
}

/// Shorten `text` to at most `max_len` characters.
///
/// Text that already fits is returned unchanged. Otherwise the first
/// `max_len - 3` characters are kept and [`ELLIPSIS`] is appended. When
/// `max_len` is smaller than the marker itself, the text is cut to
/// `max_len` characters with no marker.
///
/// Lengths are counted in `char`s, never bytes, so multi-byte text is never
/// split inside a code point.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    let marker_len = ELLIPSIS.chars().count();

    if text.chars().count() <= max_len {
        return text.to_string();
    }
    if max_len < marker_len {
        return text.chars().take(max_len).collect();
    }

    let mut out: String = text.chars().take(max_len - marker_len).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Escape the five XML-significant characters in a single pass.
///
/// Each input character is inspected once, so entities introduced here are
/// never escaped a second time.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// Format an ISO 8601 timestamp as `YYYY-MM-DD`.
///
/// Unparseable input falls back to its first ten characters.
pub fn format_date(timestamp: &str) -> String {
    match parse_date(timestamp) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => timestamp.trim().chars().take(10).collect(),
    }
}

/// Format an ISO 8601 timestamp as a long English date, e.g. `June 1, 2024`.
///
/// Unparseable input falls back to its first ten characters.
pub fn format_date_long(timestamp: &str) -> String {
    match parse_date(timestamp) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => timestamp.trim().chars().take(10).collect(),
    }
}

fn parse_date(timestamp: &str) -> Option<NaiveDate> {
    let trimmed = timestamp.trim();
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok())
}
