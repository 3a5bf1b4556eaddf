use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

const NAIVE_DATETIME_PATTERNS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Parses an ISO-8601 bucket start into UTC.
///
/// Accepts RFC 3339, minute precision (`2024-01-01T00:00Z`), naive
/// date-times (read as UTC) and bare dates (midnight UTC).
pub fn parse_period_start(value: &str) -> ChartResult<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    let naive_input = trimmed
        .strip_suffix('Z')
        .or_else(|| trimmed.strip_suffix('z'))
        .unwrap_or(trimmed);
    for pattern in NAIVE_DATETIME_PATTERNS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(naive_input, pattern) {
            return Ok(naive.and_utc());
        }
    }

    match NaiveDate::parse_from_str(naive_input, "%Y-%m-%d") {
        Ok(date) => date
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc())
            .ok_or_else(|| ChartError::InvalidTimestamp {
                value: value.to_owned(),
                reason: "date has no midnight".to_owned(),
            }),
        Err(err) => Err(ChartError::InvalidTimestamp {
            value: value.to_owned(),
            reason: err.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).single().expect("valid date")
    }

    #[test]
    fn parses_minute_precision_zulu() {
        let parsed = parse_period_start("2024-01-01T00:00Z").expect("parse");
        assert_eq!(parsed, utc(2024, 1, 1, 0, 0));
    }

    #[test]
    fn normalizes_offsets_to_utc() {
        let parsed = parse_period_start("2024-03-05T12:30:00+02:00").expect("parse");
        assert_eq!(parsed, utc(2024, 3, 5, 10, 30));
    }

    #[test]
    fn accepts_naive_and_date_only_forms() {
        assert_eq!(
            parse_period_start("2024-03-05 08:15:00").expect("naive"),
            utc(2024, 3, 5, 8, 15)
        );
        assert_eq!(
            parse_period_start("2024-03-05T08:15:00.250").expect("fractional").timestamp(),
            utc(2024, 3, 5, 8, 15).timestamp()
        );
        assert_eq!(
            parse_period_start("2024-03-05").expect("date"),
            utc(2024, 3, 5, 0, 0)
        );
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_period_start("yesterday").expect_err("must fail");
        assert!(matches!(err, ChartError::InvalidTimestamp { .. }));
    }
}
