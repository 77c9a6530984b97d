//! Dedup ledger row model.

use chrono::NaiveDate;
use gobarber_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `notifications_sent` table.
///
/// `client_id` is `None` for aggregate events such as the daily summary.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DeliveryRecord {
    pub id: DbId,
    pub client_id: Option<DbId>,
    pub event_type: String,
    pub date: NaiveDate,
}
