use gobarber_core::error::CoreError;

/// Errors surfaced by the notification engine to its callers.
///
/// Per-client evaluation failures and per-endpoint delivery failures never
/// show up here; they are logged and folded into results. Only storage
/// failures and lookups of missing entities abort an operation.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Payload serialization failed: {0}")]
    Payload(#[from] serde_json::Error),
}
