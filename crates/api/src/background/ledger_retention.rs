//! Periodic cleanup of old `notifications_sent` rows.
//!
//! The dedup ledger only needs recent history: the scheduler looks back at
//! most a week to gate weekly summaries. Older rows are purged hourly.

use std::time::Duration;

use chrono::{Days, Local, NaiveDate};
use gobarber_db::repositories::NotificationLedgerRepo;
use gobarber_db::DbPool;
use tokio_util::sync::CancellationToken;

/// Retention is never shortened below this, so weekly gating keeps working.
pub const MIN_RETENTION_DAYS: i64 = 7;

/// How often the cleanup job runs.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(3600);

/// Oldest ledger date that is kept for a given retention.
pub fn retention_cutoff(today: NaiveDate, retention_days: i64) -> NaiveDate {
    let days = retention_days.max(MIN_RETENTION_DAYS) as u64;
    today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}

/// Run the ledger retention loop until `cancel` is triggered.
pub async fn run(pool: DbPool, retention_days: i64, cancel: CancellationToken) {
    tracing::info!(
        retention_days = retention_days.max(MIN_RETENTION_DAYS),
        interval_secs = CLEANUP_INTERVAL.as_secs(),
        "Ledger retention job started"
    );

    let mut interval = tokio::time::interval(CLEANUP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Ledger retention job stopping");
                break;
            }
            _ = interval.tick() => {
                let cutoff = retention_cutoff(Local::now().date_naive(), retention_days);
                match NotificationLedgerRepo::delete_older_than(&pool, cutoff).await {
                    Ok(deleted) => {
                        if deleted > 0 {
                            tracing::info!(deleted, %cutoff, "Ledger retention: purged old rows");
                        } else {
                            tracing::debug!("Ledger retention: no rows to purge");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Ledger retention: cleanup failed");
                    }
                }
            }
        }
    }
}
