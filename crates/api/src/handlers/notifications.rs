//! Handlers for the `/notifications` resource: push subscriptions,
//! operator broadcasts and on-demand client alerts.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use gobarber_core::types::DbId;
use gobarber_db::models::push_subscription::CreatePushSubscription;
use gobarber_db::repositories::PushSubscriptionRepo;
use gobarber_events::{OnDemandTrigger, PushPayload};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct VapidKeyResponse {
    pub public_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub id: DbId,
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub deleted: u64,
}

/// Body for `POST /notifications/send`.
#[derive(Debug, Deserialize)]
pub struct SendNotificationRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub url: Option<String>,
}

/// Body for `POST /notifications/trigger`.
#[derive(Debug, Default, Deserialize)]
pub struct TriggerRequest {
    /// Target a single client; all clients when omitted. Accepts a number
    /// or a numeric string.
    #[serde(default, alias = "clientId", deserialize_with = "deserialize_client_id")]
    pub client_id: Option<DbId>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ClientIdInput {
    Number(DbId),
    Text(String),
}

fn deserialize_client_id<'de, D>(deserializer: D) -> Result<Option<DbId>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<ClientIdInput>::deserialize(deserializer)? {
        None => Ok(None),
        Some(ClientIdInput::Number(id)) => Ok(Some(id)),
        Some(ClientIdInput::Text(raw)) => {
            let raw = raw.trim();
            if raw.is_empty() {
                return Ok(None);
            }
            raw.parse()
                .map(Some)
                .map_err(|_| de::Error::custom(format!("invalid client id '{raw}'")))
        }
    }
}

// ---------------------------------------------------------------------------
// Subscriptions
// ---------------------------------------------------------------------------

/// GET /api/v1/notifications/vapid-public-key
///
/// `public_key` is `null` when push is not configured.
pub async fn vapid_public_key(State(state): State<AppState>) -> impl IntoResponse {
    Json(DataResponse {
        data: VapidKeyResponse {
            public_key: state.vapid_public_key.clone(),
        },
    })
}

/// POST /api/v1/notifications/subscribe
///
/// Register a browser push subscription. Re-subscribing an endpoint that
/// is already known returns its existing id.
pub async fn subscribe(
    State(state): State<AppState>,
    Json(input): Json<CreatePushSubscription>,
) -> AppResult<impl IntoResponse> {
    let endpoint = input.endpoint.trim();
    if endpoint.is_empty() {
        return Err(AppError::BadRequest(
            "Invalid subscription: endpoint is required".to_string(),
        ));
    }

    let id =
        PushSubscriptionRepo::upsert(&state.pool, endpoint, &input.keys.p256dh, &input.keys.auth)
            .await?;

    tracing::info!(subscription_id = id, "Push subscription registered");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SubscribeResponse { id },
        }),
    ))
}

/// GET /api/v1/notifications/subscriptions
pub async fn list_subscriptions(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let subscriptions = PushSubscriptionRepo::list(&state.pool).await?;

    Ok(Json(DataResponse {
        data: subscriptions,
    }))
}

/// DELETE /api/v1/notifications/subscriptions
///
/// Administrative reset: forget every push subscription.
pub async fn reset_subscriptions(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let deleted = PushSubscriptionRepo::delete_all(&state.pool).await?;

    tracing::warn!(deleted, "All push subscriptions removed");

    Ok(Json(DataResponse {
        data: ResetResponse { deleted },
    }))
}

// ---------------------------------------------------------------------------
// Sending
// ---------------------------------------------------------------------------

/// POST /api/v1/notifications/send
///
/// Broadcast an operator-supplied payload to every subscription and report
/// `sent/total` with per-endpoint results.
pub async fn send_notification(
    State(state): State<AppState>,
    Json(input): Json<SendNotificationRequest>,
) -> AppResult<impl IntoResponse> {
    if input.title.trim().is_empty() || input.body.trim().is_empty() {
        return Err(AppError::BadRequest("title and body are required".to_string()));
    }

    let payload = PushPayload::new(input.title, input.body, input.url);
    let report = state.dispatcher.deliver(&payload).await?;

    tracing::info!(
        sent = report.sent,
        total = report.total,
        "Operator notification sent"
    );

    Ok(Json(DataResponse { data: report }))
}

/// POST /api/v1/notifications/trigger
///
/// Send personalized alerts for one client (or all) right now, bypassing
/// the schedule and the dedup ledger. The body is optional.
pub async fn trigger_notifications(
    State(state): State<AppState>,
    body: Option<Json<TriggerRequest>>,
) -> AppResult<impl IntoResponse> {
    let client_id = body.and_then(|Json(req)| req.client_id);

    let trigger = OnDemandTrigger::new(state.pool.clone(), state.dispatcher.clone());
    let results = trigger.trigger(client_id).await?;

    Ok(Json(DataResponse { data: results }))
}
