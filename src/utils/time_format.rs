//! Spreadsheet-friendly timestamp formatting.

use chrono::{DateTime, Utc};

/// Formats a timestamp as `DD-MM` in UTC, the layout the operations sheet uses
/// for the "last update" column.
pub fn day_month(ts: &DateTime<Utc>) -> String {
    ts.format("%d-%m").to_string()
}

/// Parses an upstream timestamp.
///
/// Accepts RFC 3339 (`2024-05-01T10:00:00Z`, `2024-05-01T10:00:00.123+07:00`)
/// and the naive `YYYY-MM-DD HH:MM:SS` form, which is taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}
