//! Calendar-day arithmetic for client dates.
//!
//! Client birthdays and last-cut dates are stored as `YYYY-MM-DD` text.
//! Everything here works at day granularity: time-of-day never enters a
//! comparison, so callers truncate "now" to a [`NaiveDate`] first.

use chrono::{Datelike, NaiveDate};

use crate::error::CoreError;

/// Storage format for every calendar date column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of a `YYYY-MM-DD` prefix.
const DATE_PREFIX_LEN: usize = 10;

/// Parse a stored calendar date.
///
/// Accepts plain `YYYY-MM-DD` as well as an ISO-8601 timestamp whose first
/// ten characters are the date (browsers occasionally submit those).
pub fn parse_date(raw: &str) -> Result<NaiveDate, CoreError> {
    let trimmed = raw.trim();
    let prefix = trimmed.get(..DATE_PREFIX_LEN).unwrap_or(trimmed);

    NaiveDate::parse_from_str(prefix, DATE_FORMAT)
        .map_err(|_| CoreError::Validation(format!("Invalid date '{raw}', expected YYYY-MM-DD")))
}

/// Parse an optional stored date where an empty string means "absent".
pub fn parse_optional_date(raw: Option<&str>) -> Result<Option<NaiveDate>, CoreError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_date(value).map(Some),
    }
}

/// Whole days from `from` to `to` (negative when `to` is earlier).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// The occurrence of an annual date (month/day of `anniversary`) in `year`.
///
/// A Feb 29 anniversary rolls over to Mar 1 in non-leap years.
pub fn occurrence_in_year(anniversary: NaiveDate, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, anniversary.month(), anniversary.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .unwrap_or(anniversary)
}

/// Days from `today` until this year's occurrence of `anniversary`.
///
/// Negative once the occurrence has passed; there is no wrap to next year.
pub fn days_until_this_years_occurrence(anniversary: NaiveDate, today: NaiveDate) -> i64 {
    days_between(today, occurrence_in_year(anniversary, today.year()))
}
