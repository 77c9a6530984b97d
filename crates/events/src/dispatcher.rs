//! Fan-out of one payload to every registered push subscription.
//!
//! Each endpoint is attempted independently and sequentially; one failure
//! never prevents attempts on the others. Endpoints the push service
//! reports as gone are deleted; every other failure leaves the endpoint in
//! place for the next send.

use std::sync::Arc;
use std::time::Duration;

use gobarber_core::types::DbId;
use gobarber_db::models::push_subscription::PushSubscription;
use gobarber_db::repositories::PushSubscriptionRepo;
use gobarber_db::DbPool;
use serde::Serialize;

use crate::delivery::{PushError, PushTransport};
use crate::error::NotifyError;
use crate::payload::PushPayload;

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Outcome of delivering to one subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryResult {
    pub subscription_id: DbId,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// The subscription was deleted because the endpoint is gone.
    pub removed: bool,
}

/// Per-endpoint results of one dispatch, with success counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeliveryReport {
    pub sent: usize,
    pub total: usize,
    pub results: Vec<DeliveryResult>,
}

impl DeliveryReport {
    fn push(&mut self, result: DeliveryResult) {
        self.total += 1;
        if result.ok {
            self.sent += 1;
        }
        self.results.push(result);
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Delivers payloads to all push subscriptions.
///
/// A dispatcher built with [`Dispatcher::disabled`] (no VAPID keys) accepts
/// every call and delivers nothing.
#[derive(Clone)]
pub struct Dispatcher {
    pool: DbPool,
    transport: Option<Arc<dyn PushTransport>>,
    timeout: Duration,
}

impl Dispatcher {
    /// Create a dispatcher that sends through `transport`, bounding each
    /// attempt by `timeout`.
    pub fn new(pool: DbPool, transport: Arc<dyn PushTransport>, timeout: Duration) -> Self {
        Self {
            pool,
            transport: Some(transport),
            timeout,
        }
    }

    /// Create a dispatcher with push delivery switched off.
    pub fn disabled(pool: DbPool) -> Self {
        Self {
            pool,
            transport: None,
            timeout: Duration::ZERO,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    /// Deliver `payload` to every subscription and report each outcome.
    ///
    /// Only storage failures while listing subscriptions abort the call.
    pub async fn deliver(&self, payload: &PushPayload) -> Result<DeliveryReport, NotifyError> {
        let Some(transport) = self.transport.as_deref() else {
            tracing::debug!("Push disabled, skipping delivery");
            return Ok(DeliveryReport::default());
        };

        let body = serde_json::to_string(payload)?;
        let subscriptions = PushSubscriptionRepo::list(&self.pool).await?;
        tracing::info!(
            subscriptions = subscriptions.len(),
            title = %payload.title,
            "Dispatching push notification"
        );

        let mut report = DeliveryReport::default();
        for subscription in &subscriptions {
            let outcome = self.attempt(transport, subscription, &body).await;
            report.push(self.record(subscription, outcome).await);
        }

        tracing::info!(sent = report.sent, total = report.total, "Push dispatch finished");
        Ok(report)
    }

    /// One bounded delivery attempt.
    async fn attempt(
        &self,
        transport: &dyn PushTransport,
        subscription: &PushSubscription,
        body: &str,
    ) -> Result<(), PushError> {
        match tokio::time::timeout(self.timeout, transport.send(subscription, body)).await {
            Ok(result) => result,
            Err(_) => Err(PushError::Timeout(self.timeout)),
        }
    }

    /// Log the outcome, drop gone endpoints, and build the result entry.
    async fn record(
        &self,
        subscription: &PushSubscription,
        outcome: Result<(), PushError>,
    ) -> DeliveryResult {
        let err = match outcome {
            Ok(()) => {
                tracing::debug!(subscription_id = subscription.id, "Push delivered");
                return DeliveryResult {
                    subscription_id: subscription.id,
                    ok: true,
                    error: None,
                    status: None,
                    removed: false,
                };
            }
            Err(e) => e,
        };

        tracing::warn!(
            subscription_id = subscription.id,
            error = %err,
            permanent = err.is_permanent(),
            "Push delivery failed"
        );

        let mut removed = false;
        if err.is_permanent() {
            match PushSubscriptionRepo::delete(&self.pool, subscription.id).await {
                Ok(deleted) => {
                    removed = deleted;
                    tracing::info!(
                        subscription_id = subscription.id,
                        "Removed expired push subscription"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        subscription_id = subscription.id,
                        error = %e,
                        "Could not remove expired push subscription"
                    );
                }
            }
        }

        DeliveryResult {
            subscription_id: subscription.id,
            ok: false,
            error: Some(err.to_string()),
            status: err.status(),
            removed,
        }
    }
}
