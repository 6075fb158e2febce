//! Date normalization to the API's `YYYY-MM-DD` form, and the lenient
//! timestamp parser shared with the normalizer's `time` index.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use serde_json::Value;

use crate::error::ApiError;
use crate::registry::json_kind;

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d", "%Y/%m/%d"];

/// A date supplied by the caller, either as text or as a timestamp value.
#[derive(Debug, Clone, PartialEq)]
pub enum DateArg {
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Zoned(DateTime<FixedOffset>),
    /// A value of the wrong kind; holds a description of what was given.
    Invalid(String),
}

impl DateArg {
    /// Empty text counts as "not supplied" for request building.
    pub fn is_blank(&self) -> bool {
        matches!(self, DateArg::Text(s) if s.trim().is_empty())
    }
}

impl From<&str> for DateArg {
    fn from(text: &str) -> Self {
        DateArg::Text(text.to_string())
    }
}

impl From<String> for DateArg {
    fn from(text: String) -> Self {
        DateArg::Text(text)
    }
}

impl From<&String> for DateArg {
    fn from(text: &String) -> Self {
        DateArg::Text(text.clone())
    }
}

impl From<NaiveDate> for DateArg {
    fn from(date: NaiveDate) -> Self {
        DateArg::Date(date)
    }
}

impl From<NaiveDateTime> for DateArg {
    fn from(dt: NaiveDateTime) -> Self {
        DateArg::DateTime(dt)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateArg {
    fn from(dt: DateTime<Tz>) -> Self {
        let offset = dt.offset().fix();
        DateArg::Zoned(dt.with_timezone(&offset))
    }
}

impl From<&Value> for DateArg {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(s) => DateArg::Text(s.clone()),
            other => DateArg::Invalid(json_kind(other).to_string()),
        }
    }
}

impl From<Value> for DateArg {
    fn from(value: Value) -> Self {
        DateArg::from(&value)
    }
}

/// Format a date as `YYYY-MM-DD`, dropping time of day and zone.
///
/// Timestamps keep their own wall clock: `2023-01-01T23:30:00+05:00`
/// formats as `2023-01-01`.
pub fn format_date(input: impl Into<DateArg>) -> Result<String, ApiError> {
    let date = match input.into() {
        DateArg::Text(text) => parse_timestamp(&text)
            .ok_or(ApiError::InvalidDate(text))?
            .date_naive(),
        DateArg::Date(date) => date,
        DateArg::DateTime(dt) => dt.date(),
        DateArg::Zoned(dt) => dt.date_naive(),
        DateArg::Invalid(kind) => {
            return Err(ApiError::InvalidArgument(format!(
                "date must be text or a timestamp, got {kind}"
            )))
        }
    };
    Ok(date.format("%Y-%m-%d").to_string())
}

/// Parse a date/time string in any of the accepted shapes.
///
/// Strings without an offset are read as UTC. Returns `None` when no shape
/// matches.
pub(crate) fn parse_timestamp(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt);
    }
    let zoned = match text.strip_suffix('Z').or_else(|| text.strip_suffix('z')) {
        Some(rest) => format!("{rest}+00:00"),
        None => text.to_string(),
    };
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&zoned, fmt) {
            return Some(dt);
        }
    }

    naive_timestamp(text).map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc.fix()))
}

fn naive_timestamp(text: &str) -> Option<NaiveDateTime> {
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt);
        }
    }
    let date = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| partial_date(text))?;
    date.and_hms_opt(0, 0, 0)
}

/// `YYYY` or `YYYY-MM`, anchored to the first day of the period.
fn partial_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.splitn(2, '-');
    let year = parts.next()?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let month = match parts.next() {
        Some(m) if !m.is_empty() && m.len() <= 2 && m.bytes().all(|b| b.is_ascii_digit()) => {
            m.parse().ok()?
        }
        Some(_) => return None,
        None => 1,
    };
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    use super::*;

    #[test]
    fn text_and_timestamp_agree() {
        let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        assert_eq!(format_date("2023-01-01").unwrap(), "2023-01-01");
        assert_eq!(format_date(date).unwrap(), "2023-01-01");
        assert_eq!(
            format_date(date.and_hms_opt(0, 0, 0).unwrap()).unwrap(),
            "2023-01-01"
        );
        assert_eq!(
            format_date(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()).unwrap(),
            "2023-01-01"
        );
    }

    #[test]
    fn time_of_day_and_zone_are_dropped() {
        assert_eq!(format_date("2023-01-01T23:30:00+05:00").unwrap(), "2023-01-01");
        assert_eq!(format_date("2023-06-15 12:45").unwrap(), "2023-06-15");
        let zoned = FixedOffset::east_opt(-8 * 3600)
            .unwrap()
            .with_ymd_and_hms(2023, 12, 31, 22, 0, 0)
            .unwrap();
        assert_eq!(format_date(zoned).unwrap(), "2023-12-31");
    }

    #[test]
    fn other_text_shapes() {
        assert_eq!(format_date("20230315").unwrap(), "2023-03-15");
        assert_eq!(format_date("2023-03").unwrap(), "2023-03-01");
        assert_eq!(format_date("2002").unwrap(), "2002-01-01");
        assert_eq!(format_date("2023-08-14T22:00Z").unwrap(), "2023-08-14");
    }

    #[test]
    fn wrong_kind_is_invalid_argument() {
        let err = format_date(&json!(12345)).unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
    }

    #[test]
    fn unparseable_text_is_invalid_date() {
        let err = format_date("invalid_date").unwrap_err();
        assert_eq!(err, ApiError::InvalidDate("invalid_date".to_string()));
        assert!(matches!(
            format_date("2023-13-01").unwrap_err(),
            ApiError::InvalidDate(_)
        ));
        assert!(matches!(format_date("").unwrap_err(), ApiError::InvalidDate(_)));
    }

    #[test]
    fn parse_timestamp_reads_naive_as_utc() {
        let ts = parse_timestamp("2023-01-01T01:00:00").unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 0);
        assert_eq!(ts.hour(), 1);

        let ts = parse_timestamp("2023-01-01T01:00:00+01:00").unwrap();
        assert_eq!(ts.with_timezone(&Utc).hour(), 0);
    }

    #[test]
    fn parse_timestamp_year_only() {
        let ts = parse_timestamp("2002").unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2002, 1, 1));
        assert!(parse_timestamp("02").is_none());
        assert!(parse_timestamp("2002-1x").is_none());
    }

    #[test]
    fn blank_text_is_blank() {
        assert!(DateArg::from("  ").is_blank());
        assert!(!DateArg::from("2023-01-01").is_blank());
    }
}
