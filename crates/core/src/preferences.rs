//! Notification preference types and validation.
//!
//! Preferences are stored as plain text/boolean columns; this module owns
//! the typed view ([`AlertPreferences`]) that the eligibility evaluator and
//! the scheduler gate operate on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Default delivery time for a fresh preferences row.
pub const DEFAULT_NOTIFY_TIME: &str = "09:00";

// ---------------------------------------------------------------------------
// NotifyFrequency
// ---------------------------------------------------------------------------

/// How often the scheduled summary may be sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotifyFrequency {
    #[serde(rename = "daily")]
    Daily,
    #[serde(rename = "every3days")]
    Every3Days,
    #[serde(rename = "weekly")]
    Weekly,
    #[serde(rename = "disabled")]
    Disabled,
}

/// Valid frequency tags, for error messages.
const VALID_FREQUENCIES: &[&str] = &["daily", "every3days", "weekly", "disabled"];

impl NotifyFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            NotifyFrequency::Daily => "daily",
            NotifyFrequency::Every3Days => "every3days",
            NotifyFrequency::Weekly => "weekly",
            NotifyFrequency::Disabled => "disabled",
        }
    }

    /// Minimum whole days between two scheduled summaries.
    ///
    /// `None` for [`NotifyFrequency::Disabled`].
    pub fn min_days_between(self) -> Option<i64> {
        match self {
            NotifyFrequency::Daily => Some(1),
            NotifyFrequency::Every3Days => Some(3),
            NotifyFrequency::Weekly => Some(7),
            NotifyFrequency::Disabled => None,
        }
    }
}

impl FromStr for NotifyFrequency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(NotifyFrequency::Daily),
            "every3days" => Ok(NotifyFrequency::Every3Days),
            "weekly" => Ok(NotifyFrequency::Weekly),
            "disabled" => Ok(NotifyFrequency::Disabled),
            other => Err(CoreError::Validation(format!(
                "Invalid notify_frequency '{other}'. Must be one of: {VALID_FREQUENCIES:?}"
            ))),
        }
    }
}

impl fmt::Display for NotifyFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// NotifyTime
// ---------------------------------------------------------------------------

/// Wall-clock `HH:MM` at which the scheduled summary is sent.
///
/// Only the hour participates in scheduling; ticks are hourly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifyTime {
    pub hour: u32,
    pub minute: u32,
}

impl FromStr for NotifyTime {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid =
            || CoreError::Validation(format!("Invalid notify_time '{s}', expected HH:MM"));

        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(invalid());
        }
        let hour: u32 = h.parse().map_err(|_| invalid())?;
        let minute: u32 = m.parse().map_err(|_| invalid())?;
        if hour > 23 || minute > 59 {
            return Err(invalid());
        }
        Ok(NotifyTime { hour, minute })
    }
}

impl fmt::Display for NotifyTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

// ---------------------------------------------------------------------------
// AlertPreferences
// ---------------------------------------------------------------------------

/// Typed notification preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertPreferences {
    pub frequency: NotifyFrequency,
    pub notify_time: NotifyTime,
    pub birthdays: bool,
    pub no_cut_15: bool,
    pub no_cut_30: bool,
}

impl Default for AlertPreferences {
    fn default() -> Self {
        Self {
            frequency: NotifyFrequency::Daily,
            notify_time: NotifyTime { hour: 9, minute: 0 },
            birthdays: true,
            no_cut_15: true,
            no_cut_30: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn frequency_round_trips_through_str() {
        for tag in VALID_FREQUENCIES {
            let freq: NotifyFrequency = tag.parse().unwrap();
            assert_eq!(freq.as_str(), *tag);
        }
    }

    #[test]
    fn unknown_frequency_is_rejected() {
        assert_matches!("hourly".parse::<NotifyFrequency>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn frequency_thresholds() {
        assert_eq!(NotifyFrequency::Daily.min_days_between(), Some(1));
        assert_eq!(NotifyFrequency::Every3Days.min_days_between(), Some(3));
        assert_eq!(NotifyFrequency::Weekly.min_days_between(), Some(7));
        assert_eq!(NotifyFrequency::Disabled.min_days_between(), None);
    }

    #[test]
    fn parse_notify_time() {
        assert_eq!(
            "09:30".parse::<NotifyTime>().unwrap(),
            NotifyTime { hour: 9, minute: 30 }
        );
        assert_eq!("7:05".parse::<NotifyTime>().unwrap().hour, 7);
    }

    #[test]
    fn reject_bad_notify_time() {
        for bad in ["24:00", "12:60", "noon", "12", "12:5", ":30", "123:00"] {
            assert!(bad.parse::<NotifyTime>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn notify_time_displays_zero_padded() {
        assert_eq!(NotifyTime { hour: 7, minute: 5 }.to_string(), "07:05");
    }

    #[test]
    fn defaults_enable_everything_daily_at_nine() {
        let prefs = AlertPreferences::default();
        assert_eq!(prefs.frequency, NotifyFrequency::Daily);
        assert_eq!(prefs.notify_time.to_string(), DEFAULT_NOTIFY_TIME);
        assert!(prefs.birthdays && prefs.no_cut_15 && prefs.no_cut_30);
    }
}
