//! Repository for the `push_subscriptions` table.

use gobarber_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::push_subscription::PushSubscription;

/// Column list for `push_subscriptions` queries.
const COLUMNS: &str = "id, endpoint, keys_p256dh, keys_auth";

/// Provides upsert/list/delete operations for push subscriptions.
pub struct PushSubscriptionRepo;

impl PushSubscriptionRepo {
    /// List every registered endpoint in registration order.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<PushSubscription>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM push_subscriptions ORDER BY id");
        sqlx::query_as::<_, PushSubscription>(&query)
            .fetch_all(pool)
            .await
    }

    /// Register an endpoint, returning its ID.
    ///
    /// If the endpoint is already registered the existing row is left
    /// untouched (keys included) and its ID is returned.
    pub async fn upsert(
        pool: &SqlitePool,
        endpoint: &str,
        p256dh: &str,
        auth: &str,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query(
            "INSERT INTO push_subscriptions (endpoint, keys_p256dh, keys_auth) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (endpoint) DO NOTHING",
        )
        .bind(endpoint)
        .bind(p256dh)
        .bind(auth)
        .execute(pool)
        .await?;

        sqlx::query_scalar("SELECT id FROM push_subscriptions WHERE endpoint = $1")
            .bind(endpoint)
            .fetch_one(pool)
            .await
    }

    /// Delete one subscription. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM push_subscriptions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every subscription. Returns the number removed.
    pub async fn delete_all(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM push_subscriptions")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
