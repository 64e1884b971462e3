//! Date parsing helpers

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Jekyll-style post file names: `2020-01-01-my-post`
    static ref DATED_STEM: Regex = Regex::new(r"^(\d{4}-\d{2}-\d{2})-(.+)$").unwrap();
}

/// Formats that carry their own UTC offset
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S %z",
    "%Y-%m-%d %H:%M %z",
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

/// Local timestamp formats, interpreted in the site timezone
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a front-matter date string in any of the accepted formats.
///
/// Values without an explicit offset are read as wall-clock time in `tz`.
pub fn parse_date(s: &str, tz: &Tz) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return localize(&naive, tz);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return localize(&d.and_hms_opt(0, 0, 0)?, tz);
        }
    }

    None
}

/// Cheap check used while decoding: does this text read as a date?
pub fn looks_like_date(s: &str) -> bool {
    let bytes = s.trim().as_bytes();
    if bytes.len() < 8 || !bytes[..4].iter().all(u8::is_ascii_digit) {
        return false;
    }
    if !matches!(bytes[4], b'-' | b'/') {
        return false;
    }
    parse_date(s, &Tz::UTC).is_some()
}

/// Split a `YYYY-MM-DD-slug` file stem into its date and slug parts
pub fn split_dated_stem(stem: &str) -> Option<(NaiveDate, &str)> {
    let caps = DATED_STEM.captures(stem)?;
    let date = NaiveDate::parse_from_str(caps.get(1)?.as_str(), "%Y-%m-%d").ok()?;
    Some((date, caps.get(2)?.as_str()))
}

/// Midnight of `date` in `tz`
pub fn start_of_day(date: NaiveDate, tz: &Tz) -> Option<DateTime<FixedOffset>> {
    localize(&date.and_hms_opt(0, 0, 0)?, tz)
}

/// Ambiguous wall-clock times take the earlier instant. Times skipped by a
/// DST gap are read with the offset in force before the gap.
fn localize(naive: &NaiveDateTime, tz: &Tz) -> Option<DateTime<FixedOffset>> {
    tz.from_local_datetime(naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(*naive + Duration::hours(1))).earliest())
        .map(|dt| dt.fixed_offset())
}
