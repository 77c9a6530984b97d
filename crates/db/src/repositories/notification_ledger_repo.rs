//! Repository for the `notifications_sent` dedup ledger.

use chrono::NaiveDate;
use gobarber_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::notification_ledger::DeliveryRecord;

/// Column list for `notifications_sent` queries.
const COLUMNS: &str = "id, client_id, event_type, date";

/// Records which events were delivered on which calendar day.
pub struct NotificationLedgerRepo;

impl NotificationLedgerRepo {
    /// Whether `event_type` has a ledger row for `date` (any client scope).
    pub async fn was_sent_on(
        pool: &SqlitePool,
        event_type: &str,
        date: NaiveDate,
    ) -> Result<bool, sqlx::Error> {
        let found: Option<i64> = sqlx::query_scalar(
            "SELECT 1 FROM notifications_sent WHERE event_type = $1 AND date = $2 LIMIT 1",
        )
        .bind(event_type)
        .bind(date)
        .fetch_optional(pool)
        .await?;
        Ok(found.is_some())
    }

    /// The most recent day on which `event_type` was recorded.
    pub async fn most_recent_date(
        pool: &SqlitePool,
        event_type: &str,
    ) -> Result<Option<NaiveDate>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT date FROM notifications_sent \
             WHERE event_type = $1 \
             ORDER BY date DESC \
             LIMIT 1",
        )
        .bind(event_type)
        .fetch_optional(pool)
        .await
    }

    /// Record a delivery. A second call for the same key is a no-op.
    ///
    /// Returns `true` if a new row was written.
    pub async fn mark_sent(
        pool: &SqlitePool,
        event_type: &str,
        client_id: Option<DbId>,
        date: NaiveDate,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO notifications_sent (client_id, event_type, date) \
             VALUES ($1, $2, $3)",
        )
        .bind(client_id)
        .bind(event_type)
        .bind(date)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List the rows for an event type, newest first.
    pub async fn list_for_event(
        pool: &SqlitePool,
        event_type: &str,
    ) -> Result<Vec<DeliveryRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications_sent \
             WHERE event_type = $1 \
             ORDER BY date DESC, id DESC"
        );
        sqlx::query_as::<_, DeliveryRecord>(&query)
            .bind(event_type)
            .fetch_all(pool)
            .await
    }

    /// Delete rows dated before `cutoff`. Returns the number removed.
    pub async fn delete_older_than(
        pool: &SqlitePool,
        cutoff: NaiveDate,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notifications_sent WHERE date < $1")
            .bind(cutoff)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
