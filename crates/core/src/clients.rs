//! Client record validation and list filters.

use chrono::{Datelike, NaiveDate};

use crate::dates::{days_between, parse_date, parse_optional_date};
use crate::error::CoreError;

/// Maximum accepted length for a client name.
pub const MAX_NAME_LEN: usize = 200;

/// Validate the user-supplied fields of a client record.
///
/// `name` must be non-blank, `birthday` a valid date, and `last_cut` either
/// absent/empty or a valid date.
pub fn validate_client(
    name: &str,
    birthday: &str,
    last_cut: Option<&str>,
) -> Result<(), CoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("Client name is required".into()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Client name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    parse_date(birthday)?;
    parse_optional_date(last_cut)?;
    Ok(())
}

/// Whether a birthday falls in `month` (1-12). Unparseable dates never match.
pub fn birthday_in_month(birthday: &str, month: u32) -> bool {
    parse_date(birthday).is_ok_and(|d| d.month() == month)
}

/// Whether more than `threshold_days` have passed since the last cut.
///
/// A client with no recorded cut is always overdue; an unparseable date
/// never is.
pub fn is_overdue(last_cut: Option<&str>, today: NaiveDate, threshold_days: i64) -> bool {
    match parse_optional_date(last_cut) {
        Ok(None) => true,
        Ok(Some(cut)) => days_between(cut, today) > threshold_days,
        Err(_) => false,
    }
}
