//! Publication dates as they appear in RSS feeds.
//!
//! Feeds disagree on the format. RFC 2822 is what RSS 2.0 asks for, but `dc:date` carries
//! ISO 8601 and some publishers only give a calendar day.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized date '{0}'")]
pub struct DateError(pub String);

/// Zone names rewritten to `+0000` when chrono's RFC 2822 parser rejects them.
const UTC_ZONE_NAMES: [&str; 4] = ["GMT", "UT", "UTC", "Z"];

/// Parse a feed date, trying RFC 2822, then ISO 8601 variants, then a bare date.
pub fn parse_rss_date(raw: &str) -> Result<DateTime<FixedOffset>, DateError> {
    let value = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc2822(value) {
        return Ok(parsed);
    }
    if let Some(numeric) = with_numeric_zone(value) {
        if let Ok(parsed) = DateTime::parse_from_rfc2822(&numeric) {
            return Ok(parsed);
        }
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%SZ") {
        return Ok(naive.and_utc().fixed_offset());
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed);
    }
    if let Ok(parsed) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%z") {
        return Ok(parsed);
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc().fixed_offset());
        }
    }

    Err(DateError(raw.to_string()))
}

fn with_numeric_zone(value: &str) -> Option<String> {
    let (rest, zone) = value.rsplit_once(' ')?;
    UTC_ZONE_NAMES
        .iter()
        .any(|name| zone.eq_ignore_ascii_case(name))
        .then(|| format!("{rest} +0000"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn rfc2822_with_named_zone() {
        let parsed = parse_rss_date("Wed, 01 May 2024 08:30:00 GMT").unwrap();
        assert_eq!(parsed.year(), 2024);
        assert_eq!(parsed.hour(), 8);
        assert_eq!(parsed.offset().local_minus_utc(), 0);
    }

    #[test]
    fn rfc2822_with_zulu_suffix() {
        let parsed = parse_rss_date("Wed, 01 May 2024 08:30:00 Z").unwrap();
        assert_eq!(parsed.minute(), 30);
    }

    #[test]
    fn rfc2822_with_numeric_offset() {
        let parsed = parse_rss_date("Wed, 01 May 2024 08:30:00 +0800").unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 8 * 3600);
        assert_eq!(parsed.naive_utc().hour(), 0);
    }

    #[test]
    fn iso_with_zulu() {
        let parsed = parse_rss_date("2024-05-01T08:30:00Z").unwrap();
        assert_eq!(parsed.day(), 1);
        assert_eq!(parsed.hour(), 8);
    }

    #[test]
    fn rfc3339_with_offset_and_fraction() {
        let parsed = parse_rss_date("2024-05-01T08:30:00.250+02:00").unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 2 * 3600);
    }

    #[test]
    fn iso_with_compact_offset() {
        let parsed = parse_rss_date("2024-05-01T08:30:00+0200").unwrap();
        assert_eq!(parsed.naive_utc().hour(), 6);
    }

    #[test]
    fn bare_date_is_midnight_utc() {
        let parsed = parse_rss_date(" 2024-05-01 ").unwrap();
        assert_eq!(parsed.hour(), 0);
        assert_eq!(parsed.offset().local_minus_utc(), 0);
    }

    #[test]
    fn garbage_is_rejected() {
        let err = parse_rss_date("yesterday-ish").unwrap_err();
        assert_eq!(err, DateError("yesterday-ish".to_string()));
        assert!(parse_rss_date("").is_err());
    }
}
