//! Route definitions for the `/notifications` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::notifications;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET    /vapid-public-key     -> vapid_public_key
/// POST   /subscribe            -> subscribe
/// GET    /subscriptions        -> list_subscriptions
/// DELETE /subscriptions        -> reset_subscriptions
/// POST   /send                 -> send_notification
/// POST   /trigger              -> trigger_notifications
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/vapid-public-key", get(notifications::vapid_public_key))
        .route("/subscribe", post(notifications::subscribe))
        .route(
            "/subscriptions",
            get(notifications::list_subscriptions).delete(notifications::reset_subscriptions),
        )
        .route("/send", post(notifications::send_notification))
        .route("/trigger", post(notifications::trigger_notifications))
}
