//! Push delivery transport.
//!
//! [`PushTransport`] is the seam between the dispatcher and the outside
//! world: it delivers one serialized payload to one subscription and
//! classifies failures as permanent (endpoint gone) or transient.
//! [`webpush::WebPushTransport`] is the production implementation.

use std::time::Duration;

use async_trait::async_trait;
use gobarber_db::models::push_subscription::PushSubscription;

pub mod webpush;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for a single push delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PushError {
    /// The push service reports the subscription no longer exists
    /// (HTTP 404 / 410). The endpoint should be forgotten.
    #[error("Push endpoint gone (HTTP {status})")]
    EndpointGone { status: u16 },

    /// The push service rejected the message with some other status.
    #[error("Push service returned HTTP {status}: {message}")]
    Rejected { status: u16, message: String },

    /// Network, crypto or credential failure before a status was received.
    #[error("Push transport error: {0}")]
    Transport(String),

    /// The attempt did not finish within the configured timeout.
    #[error("Push delivery timed out after {0:?}")]
    Timeout(Duration),
}

impl PushError {
    /// Classify a push service HTTP status.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        match status {
            404 | 410 => PushError::EndpointGone { status },
            _ => PushError::Rejected {
                status,
                message: message.into(),
            },
        }
    }

    /// Whether the endpoint should be deleted rather than retried later.
    pub fn is_permanent(&self) -> bool {
        matches!(self, PushError::EndpointGone { .. })
    }

    /// HTTP status reported by the push service, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            PushError::EndpointGone { status } | PushError::Rejected { status, .. } => {
                Some(*status)
            }
            PushError::Transport(_) | PushError::Timeout(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// PushTransport
// ---------------------------------------------------------------------------

/// Delivers a JSON payload to a single push subscription.
#[async_trait]
pub trait PushTransport: Send + Sync {
    async fn send(&self, subscription: &PushSubscription, payload: &str) -> Result<(), PushError>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
