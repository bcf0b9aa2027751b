use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const MS_IN_H: i64 = Self::MS_IN_MIN * 60;
    pub const MS_IN_D: i64 = Self::MS_IN_H * 24;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";
}

// Time Helper functions

/// Floor an epoch-ms timestamp to UTC midnight of the day it falls in.
/// All day arithmetic in the engine runs on these normalized values, never on
/// local midnights (local flooring drifts across DST transitions).
pub fn utc_midnight(epoch_ms: i64) -> i64 {
    epoch_ms.div_euclid(TimeUtils::MS_IN_D) * TimeUtils::MS_IN_D
}

/// Inclusive day count between two UTC-midnight timestamps.
/// Zero when `end_ts` lies before `start_ts`.
pub fn day_span(start_ts: i64, end_ts: i64) -> i64 {
    if end_ts < start_ts {
        return 0;
    }
    (end_ts - start_ts) / TimeUtils::MS_IN_D + 1
}

/// UTC midnight of a civil date, or None for dates the calendar rejects
/// (e.g. Feb 30).
pub fn ymd_to_epoch_ms(year: i32, month: u32, day: u32) -> Option<i64> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
}

/// Civil parts of a UTC timestamp: (month 1-12, day-of-month 1-31, weekday).
pub fn civil_parts(epoch_ms: i64) -> Option<(u32, u32, Weekday)> {
    let dt = DateTime::<Utc>::from_timestamp_millis(epoch_ms)?;
    Some((dt.month(), dt.day(), dt.weekday()))
}

pub fn epoch_ms_to_date_string(epoch_ms: i64) -> String {
    // Used for display purposes
    match DateTime::<Utc>::from_timestamp_millis(epoch_ms) {
        Some(dt) => format!("{}", dt.format(TimeUtils::STANDARD_TIME_FORMAT)),
        None => "invalid date".to_string(),
    }
}

/// Parse a `YYYY-MM-DD` CLI argument into a UTC-midnight timestamp.
pub fn parse_date_arg(raw: &str) -> Result<i64> {
    let date = NaiveDate::parse_from_str(raw, TimeUtils::STANDARD_TIME_FORMAT)
        .with_context(|| format!("invalid date '{raw}', expected YYYY-MM-DD"))?;
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .with_context(|| format!("date '{raw}' has no UTC midnight"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn midnight_flooring_is_utc_stable() {
        let midday = ymd_to_epoch_ms(2026, 3, 15).unwrap() + 13 * TimeUtils::MS_IN_H;
        assert_eq!(utc_midnight(midday), ymd_to_epoch_ms(2026, 3, 15).unwrap());
        // Negative timestamps (pre-1970) floor toward the earlier day.
        let pre_epoch = ymd_to_epoch_ms(1969, 12, 31).unwrap() + 5 * TimeUtils::MS_IN_H;
        assert_eq!(utc_midnight(pre_epoch), ymd_to_epoch_ms(1969, 12, 31).unwrap());
    }

    #[test]
    fn day_span_is_inclusive() {
        let start = ymd_to_epoch_ms(2026, 1, 1).unwrap();
        let end = ymd_to_epoch_ms(2026, 1, 10).unwrap();
        assert_eq!(day_span(start, end), 10);
        assert_eq!(day_span(start, start), 1);
        assert_eq!(day_span(end, start), 0);
    }

    #[test]
    fn leap_years_are_exact() {
        let feb28 = ymd_to_epoch_ms(2024, 2, 28).unwrap();
        let mar01 = ymd_to_epoch_ms(2024, 3, 1).unwrap();
        assert_eq!(day_span(feb28, mar01), 3); // Feb 29 exists in 2024
        assert_eq!(ymd_to_epoch_ms(2023, 2, 29), None);
    }

    #[test]
    fn parse_date_arg_round_trips() {
        let ts = parse_date_arg("2026-08-07").unwrap();
        assert_eq!(epoch_ms_to_date_string(ts), "2026-08-07");
        assert!(parse_date_arg("not-a-date").is_err());
    }
}
