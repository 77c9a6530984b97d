//! Push subscription entity model and DTOs.

use gobarber_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `push_subscriptions` table: one browser/device endpoint.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PushSubscription {
    pub id: DbId,
    pub endpoint: String,
    pub keys_p256dh: String,
    pub keys_auth: String,
}

/// Encryption keys from the browser's `PushSubscription.toJSON()`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriptionKeys {
    #[serde(default)]
    pub p256dh: String,
    #[serde(default)]
    pub auth: String,
}

/// DTO for registering a push subscription.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePushSubscription {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub keys: SubscriptionKeys,
}
