//! Repository for the singleton `user_preferences` row.

use gobarber_core::preferences::AlertPreferences;
use sqlx::SqlitePool;

use crate::models::preferences::UserPreferences;

/// Column list for `user_preferences` queries.
const COLUMNS: &str =
    "id, notify_frequency, notify_birthdays, notify_no_cut_15, notify_no_cut_30, notify_time";

/// Reads and replaces the notification preferences.
///
/// Only one logical row exists; if duplicates ever appear the one with the
/// highest ID wins.
pub struct PreferencesRepo;

impl PreferencesRepo {
    /// Fetch the current preferences row, if any.
    pub async fn find_current(pool: &SqlitePool) -> Result<Option<UserPreferences>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_preferences ORDER BY id DESC LIMIT 1");
        sqlx::query_as::<_, UserPreferences>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the current preferences, falling back to unsaved defaults.
    pub async fn get_or_default(pool: &SqlitePool) -> Result<UserPreferences, sqlx::Error> {
        Ok(Self::find_current(pool)
            .await?
            .unwrap_or_else(UserPreferences::defaults))
    }

    /// Replace the current preferences, inserting the row if none exists.
    pub async fn replace(
        pool: &SqlitePool,
        prefs: &AlertPreferences,
    ) -> Result<UserPreferences, sqlx::Error> {
        let stored = UserPreferences::from_alert_preferences(0, prefs);

        let updated = match Self::find_current(pool).await? {
            Some(current) => {
                let query = format!(
                    "UPDATE user_preferences SET \
                        notify_frequency = $2, \
                        notify_birthdays = $3, \
                        notify_no_cut_15 = $4, \
                        notify_no_cut_30 = $5, \
                        notify_time = $6, \
                        updated_at = CURRENT_TIMESTAMP \
                     WHERE id = $1 \
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, UserPreferences>(&query)
                    .bind(current.id)
                    .bind(&stored.notify_frequency)
                    .bind(stored.notify_birthdays)
                    .bind(stored.notify_no_cut_15)
                    .bind(stored.notify_no_cut_30)
                    .bind(&stored.notify_time)
                    .fetch_one(pool)
                    .await?
            }
            None => {
                tracing::debug!("No preferences row found, inserting one");
                let query = format!(
                    "INSERT INTO user_preferences \
                        (notify_frequency, notify_birthdays, notify_no_cut_15, notify_no_cut_30, notify_time) \
                     VALUES ($1, $2, $3, $4, $5) \
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, UserPreferences>(&query)
                    .bind(&stored.notify_frequency)
                    .bind(stored.notify_birthdays)
                    .bind(stored.notify_no_cut_15)
                    .bind(stored.notify_no_cut_30)
                    .bind(&stored.notify_time)
                    .fetch_one(pool)
                    .await?
            }
        };

        Ok(updated)
    }
}
