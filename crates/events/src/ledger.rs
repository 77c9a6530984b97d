//! Dedup ledger on top of the `notifications_sent` table.
//!
//! Keys are `(client, event type, calendar day)`. Writes are
//! insert-or-ignore, so concurrent or repeated marks never duplicate a row
//! and never fail.

use chrono::NaiveDate;
use gobarber_core::dates::days_between;
use gobarber_core::types::DbId;
use gobarber_db::repositories::NotificationLedgerRepo;
use gobarber_db::DbPool;

/// Day-granular delivery bookkeeping.
#[derive(Clone)]
pub struct DedupLedger {
    pool: DbPool,
}

impl DedupLedger {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Whether `event_type` (any client or aggregate) was recorded on `today`.
    pub async fn already_sent_today(
        &self,
        event_type: &str,
        today: NaiveDate,
    ) -> Result<bool, sqlx::Error> {
        NotificationLedgerRepo::was_sent_on(&self.pool, event_type, today).await
    }

    /// Record a delivery. Returns `false` when the key already existed.
    pub async fn mark_sent(
        &self,
        event_type: &str,
        client_id: Option<DbId>,
        today: NaiveDate,
    ) -> Result<bool, sqlx::Error> {
        let inserted =
            NotificationLedgerRepo::mark_sent(&self.pool, event_type, client_id, today).await?;
        if !inserted {
            tracing::debug!(event_type, ?client_id, %today, "Delivery already recorded");
        }
        Ok(inserted)
    }

    /// Whole days since the most recent record of `event_type`, or `None`
    /// if it was never sent.
    pub async fn days_since_last(
        &self,
        event_type: &str,
        today: NaiveDate,
    ) -> Result<Option<i64>, sqlx::Error> {
        let last = NotificationLedgerRepo::most_recent_date(&self.pool, event_type).await?;
        Ok(last.map(|date| days_between(date, today)))
    }
}
