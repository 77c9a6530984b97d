use std::sync::Arc;

use gobarber_events::Dispatcher;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool and dispatcher are handles, the config is
/// behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: gobarber_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Push dispatcher (disabled when VAPID keys are not configured).
    pub dispatcher: Dispatcher,
    /// VAPID public key handed to browsers, if push is configured.
    pub vapid_public_key: Option<String>,
}
