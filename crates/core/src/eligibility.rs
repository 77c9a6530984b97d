//! Per-client notification eligibility.
//!
//! [`evaluate`] looks at one client's birthday and last-cut date and
//! returns the alert kinds the client qualifies for today. A client yields
//! at most one birthday alert and at most one no-cut alert.

use chrono::NaiveDate;

use crate::alerts::{
    AlertKind, BIRTHDAY_SOON_DAYS, BIRTHDAY_UPCOMING_DAYS, NO_CUT_OVERDUE_DAYS,
    NO_CUT_SEVERE_DAYS,
};
use crate::dates::{days_between, days_until_this_years_occurrence, parse_date, parse_optional_date};
use crate::error::CoreError;
use crate::preferences::AlertPreferences;

/// One eligible alert for a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    /// Days until the birthday, or days since the last cut. `None` when
    /// no cut has ever been recorded.
    pub days: Option<i64>,
}

/// Evaluate one client against today's date and the current preferences.
///
/// Birthday alerts only consider this year's occurrence: once it has
/// passed nothing fires until next year. A missing last cut maps to
/// [`AlertKind::NoCut15`], never to the severe category.
///
/// Returns an error when a date the enabled checks need cannot be parsed.
pub fn evaluate(
    birthday: &str,
    last_cut: Option<&str>,
    today: NaiveDate,
    prefs: &AlertPreferences,
) -> Result<Vec<Alert>, CoreError> {
    let mut alerts = Vec::with_capacity(2);

    if prefs.birthdays {
        let birthday = parse_date(birthday)?;
        if let Some(alert) = birthday_alert(days_until_this_years_occurrence(birthday, today)) {
            alerts.push(alert);
        }
    }

    if prefs.no_cut_15 || prefs.no_cut_30 {
        if let Some(alert) = no_cut_alert(parse_optional_date(last_cut)?, today, prefs) {
            alerts.push(alert);
        }
    }

    Ok(alerts)
}

/// Classify the distance to this year's birthday.
fn birthday_alert(days_until: i64) -> Option<Alert> {
    let kind = match days_until {
        0 => AlertKind::BirthdayToday,
        d if d > 0 && d <= BIRTHDAY_SOON_DAYS => AlertKind::BirthdayIn3,
        d if d > BIRTHDAY_SOON_DAYS && d <= BIRTHDAY_UPCOMING_DAYS => AlertKind::BirthdayIn7,
        _ => return None,
    };
    Some(Alert {
        kind,
        days: Some(days_until),
    })
}

/// Classify the time since the last cut.
fn no_cut_alert(
    last_cut: Option<NaiveDate>,
    today: NaiveDate,
    prefs: &AlertPreferences,
) -> Option<Alert> {
    let Some(last_cut) = last_cut else {
        return prefs.no_cut_15.then_some(Alert {
            kind: AlertKind::NoCut15,
            days: None,
        });
    };

    let since = days_between(last_cut, today);
    let kind = if since > NO_CUT_SEVERE_DAYS && prefs.no_cut_30 {
        AlertKind::NoCut30
    } else if since > NO_CUT_OVERDUE_DAYS && prefs.no_cut_15 {
        AlertKind::NoCut15
    } else {
        return None;
    };
    Some(Alert {
        kind,
        days: Some(since),
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn kinds(birthday: &str, last_cut: Option<&str>, prefs: &AlertPreferences) -> Vec<AlertKind> {
        evaluate(birthday, last_cut, today(), prefs)
            .unwrap()
            .into_iter()
            .map(|a| a.kind)
            .collect()
    }

    fn birthdays_only() -> AlertPreferences {
        AlertPreferences {
            no_cut_15: false,
            no_cut_30: false,
            ..AlertPreferences::default()
        }
    }

    // -----------------------------------------------------------------------
    // Birthday boundaries
    // -----------------------------------------------------------------------

    #[test]
    fn birthday_today() {
        assert_eq!(kinds("1990-06-01", None, &birthdays_only()), [AlertKind::BirthdayToday]);
    }

    #[test]
    fn birthday_in_three_days_is_inclusive() {
        assert_eq!(kinds("1990-06-04", None, &birthdays_only()), [AlertKind::BirthdayIn3]);
    }

    #[test]
    fn birthday_in_seven_days_is_inclusive() {
        assert_eq!(kinds("1990-06-08", None, &birthdays_only()), [AlertKind::BirthdayIn7]);
    }

    #[test]
    fn birthday_eight_days_out_is_ignored() {
        assert!(kinds("1990-06-09", None, &birthdays_only()).is_empty());
    }

    #[test]
    fn passed_birthday_does_not_wrap_to_next_year() {
        assert!(kinds("1990-05-31", None, &birthdays_only()).is_empty());
    }

    #[test]
    fn birthday_alert_reports_days_until() {
        let alerts = evaluate("1990-06-06", None, today(), &birthdays_only()).unwrap();
        assert_eq!(alerts[0].days, Some(5));
    }

    #[test]
    fn birthdays_disabled_skips_birthday_parsing() {
        let prefs = AlertPreferences {
            birthdays: false,
            ..AlertPreferences::default()
        };
        let alerts = evaluate("not a date", Some("2024-05-30"), today(), &prefs).unwrap();
        assert!(alerts.is_empty());
    }

    // -----------------------------------------------------------------------
    // Last-cut classification
    // -----------------------------------------------------------------------

    #[test]
    fn forty_days_is_severe_only() {
        let prefs = AlertPreferences::default();
        let result = kinds("1990-01-01", Some("2024-04-22"), &prefs);
        assert_eq!(result, [AlertKind::NoCut30]);
    }

    #[test]
    fn twenty_days_is_overdue() {
        let prefs = AlertPreferences::default();
        assert_eq!(kinds("1990-01-01", Some("2024-05-12"), &prefs), [AlertKind::NoCut15]);
    }

    #[test]
    fn fifteen_days_is_not_overdue() {
        let prefs = AlertPreferences::default();
        assert!(kinds("1990-01-01", Some("2024-05-17"), &prefs).is_empty());
    }

    #[test]
    fn thirty_days_is_overdue_but_not_severe() {
        let prefs = AlertPreferences::default();
        assert_eq!(kinds("1990-01-01", Some("2024-05-02"), &prefs), [AlertKind::NoCut15]);
    }

    #[test]
    fn severe_falls_back_to_overdue_when_severe_disabled() {
        let prefs = AlertPreferences {
            no_cut_30: false,
            ..AlertPreferences::default()
        };
        assert_eq!(kinds("1990-01-01", Some("2024-04-01"), &prefs), [AlertKind::NoCut15]);
    }

    #[test]
    fn missing_last_cut_is_capped_at_overdue() {
        let prefs = AlertPreferences::default();
        let alerts = evaluate("1990-01-01", None, today(), &prefs).unwrap();
        assert_eq!(
            alerts,
            [Alert {
                kind: AlertKind::NoCut15,
                days: None
            }]
        );
    }

    #[test]
    fn empty_last_cut_counts_as_missing() {
        let prefs = AlertPreferences::default();
        assert_eq!(kinds("1990-01-01", Some(""), &prefs), [AlertKind::NoCut15]);
    }

    #[test]
    fn missing_last_cut_with_overdue_disabled_yields_nothing() {
        let prefs = AlertPreferences {
            no_cut_15: false,
            ..AlertPreferences::default()
        };
        assert!(kinds("1990-01-01", None, &prefs).is_empty());
    }

    // -----------------------------------------------------------------------
    // Combined
    // -----------------------------------------------------------------------

    #[test]
    fn birthday_and_no_cut_can_both_fire() {
        let prefs = AlertPreferences::default();
        assert_eq!(
            kinds("1990-06-01", Some("2024-04-01"), &prefs),
            [AlertKind::BirthdayToday, AlertKind::NoCut30]
        );
    }

    #[test]
    fn malformed_birthday_is_an_error() {
        let result = evaluate("31/12/1990", None, today(), &AlertPreferences::default());
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn malformed_last_cut_is_an_error() {
        let result = evaluate("1990-01-01", Some("yesterday"), today(), &AlertPreferences::default());
        assert_matches!(result, Err(CoreError::Validation(_)));
    }
}
