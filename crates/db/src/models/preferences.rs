//! Notification preferences model and DTOs.

use gobarber_core::error::CoreError;
use gobarber_core::preferences::{AlertPreferences, NotifyFrequency, NotifyTime};
use gobarber_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `user_preferences` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserPreferences {
    pub id: DbId,
    pub notify_frequency: String,
    pub notify_birthdays: bool,
    pub notify_no_cut_15: bool,
    pub notify_no_cut_30: bool,
    pub notify_time: String,
}

impl UserPreferences {
    /// Unsaved defaults, returned when the table is empty.
    pub fn defaults() -> Self {
        Self::from_alert_preferences(0, &AlertPreferences::default())
    }

    pub fn from_alert_preferences(id: DbId, prefs: &AlertPreferences) -> Self {
        Self {
            id,
            notify_frequency: prefs.frequency.as_str().to_string(),
            notify_birthdays: prefs.birthdays,
            notify_no_cut_15: prefs.no_cut_15,
            notify_no_cut_30: prefs.no_cut_30,
            notify_time: prefs.notify_time.to_string(),
        }
    }

    /// Typed view of the stored row.
    pub fn to_alert_preferences(&self) -> Result<AlertPreferences, CoreError> {
        Ok(AlertPreferences {
            frequency: self.notify_frequency.parse()?,
            notify_time: self.notify_time.parse()?,
            birthdays: self.notify_birthdays,
            no_cut_15: self.notify_no_cut_15,
            no_cut_30: self.notify_no_cut_30,
        })
    }
}

/// DTO for replacing the preferences (`PUT /preferences`).
///
/// Omitted fields fall back to their defaults rather than keeping the
/// previous value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePreferences {
    pub notify_frequency: Option<String>,
    pub notify_birthdays: Option<bool>,
    pub notify_no_cut_15: Option<bool>,
    pub notify_no_cut_30: Option<bool>,
    pub notify_time: Option<String>,
}

impl UpdatePreferences {
    /// Validate and resolve against the defaults.
    pub fn resolve(&self) -> Result<AlertPreferences, CoreError> {
        let defaults = AlertPreferences::default();

        let frequency = match self.notify_frequency.as_deref() {
            Some(tag) => tag.parse::<NotifyFrequency>()?,
            None => defaults.frequency,
        };
        let notify_time = match self.notify_time.as_deref() {
            Some(raw) => raw.parse::<NotifyTime>()?,
            None => defaults.notify_time,
        };

        Ok(AlertPreferences {
            frequency,
            notify_time,
            birthdays: self.notify_birthdays.unwrap_or(defaults.birthdays),
            no_cut_15: self.notify_no_cut_15.unwrap_or(defaults.no_cut_15),
            no_cut_30: self.notify_no_cut_30.unwrap_or(defaults.no_cut_30),
        })
    }
}
