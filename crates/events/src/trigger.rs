//! Manual, per-client notifications.
//!
//! [`OnDemandTrigger`] ignores the hour/frequency gate and the dedup
//! ledger. Every alert a client qualifies for becomes its own personalized
//! payload, dispatched to all subscriptions.

use chrono::{Local, NaiveDate};
use gobarber_core::alerts::AlertKind;
use gobarber_core::eligibility::evaluate;
use gobarber_core::error::CoreError;
use gobarber_core::types::DbId;
use gobarber_db::repositories::{ClientRepo, PreferencesRepo};
use gobarber_db::DbPool;
use serde::Serialize;

use crate::dispatcher::{DeliveryResult, Dispatcher};
use crate::error::NotifyError;
use crate::payload::PushPayload;

/// One personalized send and its per-endpoint results.
#[derive(Debug, Clone, Serialize)]
pub struct TriggerResult {
    pub client_id: DbId,
    pub kind: AlertKind,
    pub payload: PushPayload,
    pub results: Vec<DeliveryResult>,
}

/// Sends per-client notifications on request.
pub struct OnDemandTrigger {
    pool: DbPool,
    dispatcher: Dispatcher,
}

impl OnDemandTrigger {
    pub fn new(pool: DbPool, dispatcher: Dispatcher) -> Self {
        Self { pool, dispatcher }
    }

    /// Trigger for one client, or for every client when `client_id` is
    /// `None`, using today's local date.
    pub async fn trigger(&self, client_id: Option<DbId>) -> Result<Vec<TriggerResult>, NotifyError> {
        self.trigger_for(client_id, Local::now().date_naive()).await
    }

    /// Trigger as if the local date were `today`.
    ///
    /// An unknown `client_id` is a [`CoreError::NotFound`]. Clients with
    /// unparseable dates are skipped when triggering for everyone.
    pub async fn trigger_for(
        &self,
        client_id: Option<DbId>,
        today: NaiveDate,
    ) -> Result<Vec<TriggerResult>, NotifyError> {
        let clients = match client_id {
            Some(id) => vec![ClientRepo::find_by_id(&self.pool, id)
                .await?
                .ok_or(CoreError::NotFound { entity: "client", id })?],
            None => ClientRepo::list(&self.pool).await?,
        };
        let prefs = PreferencesRepo::get_or_default(&self.pool)
            .await?
            .to_alert_preferences()?;

        let mut results = Vec::new();
        for client in &clients {
            let alerts = match evaluate(&client.birthday, client.last_cut.as_deref(), today, &prefs)
            {
                Ok(alerts) => alerts,
                Err(e) => {
                    tracing::warn!(
                        client_id = client.id,
                        error = %e,
                        "Skipping client with invalid dates"
                    );
                    continue;
                }
            };

            for alert in alerts {
                let payload = PushPayload::for_client(client, &alert);
                let report = self.dispatcher.deliver(&payload).await?;
                tracing::info!(
                    client_id = client.id,
                    kind = %alert.kind,
                    sent = report.sent,
                    total = report.total,
                    "On-demand notification dispatched"
                );
                results.push(TriggerResult {
                    client_id: client.id,
                    kind: alert.kind,
                    payload,
                    results: report.results,
                });
            }
        }

        Ok(results)
    }
}
