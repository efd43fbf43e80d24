//! Date parsing and display helpers

use crate::{Error, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// Display format for episode publication dates (`8 Jan 21`)
const PUBLISHED_AT_FORMAT: &str = "%-d %b %y";

/// Display format for the header date (`Sat Oct 17 2026`)
const HEADER_DATE_FORMAT: &str = "%a %b %d %Y";

/// Parse an ISO-8601 date or date-time as published by the episodes API.
///
/// Accepts RFC 3339 timestamps, naive date-times with either a `T` or a space
/// separator, and plain dates.
pub fn parse_iso(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_local());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| Error::InvalidInput(format!("Unparsable date: {:?}", value)))
}

/// Format an API publication date as `d MMM yy`.
pub fn format_published_at(value: &str) -> Result<String> {
    Ok(parse_iso(value)?.format(PUBLISHED_AT_FORMAT).to_string())
}

/// Format a date the way the page header shows it.
pub fn format_header_date(date: DateTime<Local>) -> String {
    date.format(HEADER_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_published_at_space_separator() {
        assert_eq!(format_published_at("2021-01-08 19:42:00").unwrap(), "8 Jan 21");
    }

    #[test]
    fn test_published_at_t_separator() {
        assert_eq!(format_published_at("2021-11-23T10:00:00").unwrap(), "23 Nov 21");
    }

    #[test]
    fn test_published_at_rfc3339() {
        assert_eq!(
            format_published_at("2020-02-29T08:15:00-03:00").unwrap(),
            "29 Feb 20"
        );
    }

    #[test]
    fn test_published_at_plain_date() {
        assert_eq!(format_published_at("2019-07-04").unwrap(), "4 Jul 19");
    }

    #[test]
    fn test_published_at_invalid() {
        let err = format_published_at("yesterday").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_header_date() {
        let date = Local.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
        assert_eq!(format_header_date(date), "Sat Oct 17 2026");
    }
}
