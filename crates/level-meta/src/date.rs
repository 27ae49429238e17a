//! Date handling for front matter `Date` headers.
//!
//! All timestamps are interpreted and rendered in UTC.

use std::fmt::Write;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Default `strftime` format for [`format_time`].
pub const DEFAULT_DATE_FORMAT: &str = "%d %b %Y";

/// Naive formats tried after RFC 3339 and RFC 2822.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parse a front matter date into a Unix timestamp.
///
/// Accepts RFC 3339, RFC 2822, `YYYY-MM-DD[ HH:MM[:SS]]` and
/// `YYYY-MM-DDTHH:MM[:SS]`. Returns `None` for anything else.
#[must_use]
pub fn parse_date(value: &str) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.timestamp());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.timestamp());
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.and_utc().timestamp());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
}

/// Render a Unix timestamp with a `strftime`-style format.
///
/// Returns `None` if the timestamp is out of range or the format string
/// contains an invalid specifier.
#[must_use]
pub fn format_time(time: i64, format: &str) -> Option<String> {
    let dt = DateTime::from_timestamp(time, 0)?;
    let mut out = String::new();
    write!(out, "{}", dt.format(format)).ok()?;
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(parse_date("2024-01-15"), Some(1_705_276_800));
    }

    #[test]
    fn test_parse_date_with_time() {
        assert_eq!(parse_date("2024-01-15 09:30"), Some(1_705_311_000));
        assert_eq!(parse_date("2024-01-15 09:30:00"), Some(1_705_311_000));
        assert_eq!(parse_date("2024-01-15T09:30:00"), Some(1_705_311_000));
    }

    #[test]
    fn test_parse_rfc3339() {
        assert_eq!(parse_date("2024-01-15T09:30:00Z"), Some(1_705_311_000));
        assert_eq!(parse_date("2024-01-15T10:30:00+01:00"), Some(1_705_311_000));
    }

    #[test]
    fn test_parse_rfc2822() {
        assert_eq!(
            parse_date("Mon, 15 Jan 2024 09:30:00 +0000"),
            Some(1_705_311_000)
        );
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_date("  2024-01-15\n"), Some(1_705_276_800));
    }

    #[test]
    fn test_parse_invalid_date() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("last tuesday"), None);
        assert_eq!(parse_date("2024-13-45"), None);
    }

    #[test]
    fn test_format_default() {
        assert_eq!(
            format_time(1_705_276_800, DEFAULT_DATE_FORMAT),
            Some("15 Jan 2024".to_owned())
        );
    }

    #[test]
    fn test_format_custom() {
        assert_eq!(
            format_time(1_705_311_000, "%Y/%m/%d %H:%M"),
            Some("2024/01/15 09:30".to_owned())
        );
    }

    #[test]
    fn test_format_invalid_specifier() {
        assert_eq!(format_time(1_705_276_800, "%Q"), None);
    }
}
