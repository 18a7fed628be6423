//! Timestamps are stored as local ISO-8601 strings without an offset, e.g.
//! `2024-05-20T12:00:00.000000`. Parsing is lenient because older records
//! were written by other tools.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";
const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

pub fn format_date(day: NaiveDate) -> String {
    day.format(DATE_FORMAT).to_string()
}

/// Parses a stored timestamp into local wall-clock time. Returns `None` for
/// anything unrecognised.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed);
        }
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Local).naive_local());
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
}

/// True when the first ten characters of `raw` spell `day`. This is a plain
/// prefix comparison; `raw` is not parsed.
pub fn has_date_prefix(raw: &str, day: NaiveDate) -> bool {
    let day = format_date(day);
    raw.chars().take(10).eq(day.chars())
}
