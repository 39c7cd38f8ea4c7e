//! Date helper functions

use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone, Utc};
use std::time::SystemTime;

/// Format used for `publish_date` and date-only front-matter values
pub const SHORT_DATE_FORMAT: &str = "%Y-%m-%d";

/// RFC 1123 with a numeric zone, as RSS readers expect in `pubDate`
const RFC1123Z_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Parse a front-matter date value
///
/// `YYYY-MM-DD` is tried first (midnight UTC), then RFC 3339. Anything else
/// yields `None` so the caller can fall back to the file's mtime.
///
/// Both forms are matched strictly: zero-padded fields, an uppercase `T`
/// separator and an uppercase `Z` zone.
pub fn parse_date(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();

    if is_short_date(s) {
        let d = NaiveDate::parse_from_str(s, SHORT_DATE_FORMAT).ok()?;
        let dt = d.and_hms_opt(0, 0, 0)?;
        return Some(Utc.from_utc_datetime(&dt).fixed_offset());
    }

    let is_timestamp = s.get(..10).is_some_and(is_short_date)
        && s.as_bytes().get(10) == Some(&b'T')
        && !s.ends_with('z');
    if !is_timestamp {
        return None;
    }

    DateTime::parse_from_rfc3339(s).ok()
}

/// Exactly `DDDD-DD-DD`
fn is_short_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Format a date as `YYYY-MM-DD` in its own offset
pub fn short_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format(SHORT_DATE_FORMAT).to_string()
}

/// Format a date per RFC 1123 with a numeric zone
///
/// # Examples
/// ```ignore
/// rfc1123z(&date) // -> "Thu, 05 Jun 2025 00:00:00 +0000"
/// ```
pub fn rfc1123z<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format(RFC1123Z_FORMAT).to_string()
}

/// Convert a filesystem timestamp into a local, fixed-offset date
pub fn from_system_time(time: SystemTime) -> DateTime<FixedOffset> {
    DateTime::<Local>::from(time).fixed_offset()
}
