pub mod clients;
pub mod dashboard;
pub mod health;
pub mod notifications;
pub mod preferences;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /clients                                   list, create
/// /clients/{id}                              get, update, delete
///
/// /preferences                               get, replace
///
/// /notifications/vapid-public-key            VAPID public key
/// /notifications/subscribe                   register a push subscription
/// /notifications/subscriptions               list, reset
/// /notifications/send                        operator broadcast
/// /notifications/trigger                     per-client on-demand alerts
///
/// /dashboard                                 alert counts
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/clients", clients::router())
        .nest("/preferences", preferences::router())
        .nest("/notifications", notifications::router())
        .nest("/dashboard", dashboard::router())
}
