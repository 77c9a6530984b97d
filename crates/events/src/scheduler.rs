//! Hourly notification scheduler.
//!
//! [`NotificationScheduler`] runs as a background task. On every tick it
//! loads the preferences, decides whether the aggregate summary is due
//! ([`evaluate_gate`]) and, if so, builds the summary, dispatches it and
//! records the send in the dedup ledger.
//!
//! Only the hour of `notify_time` is compared. A tick missed at the
//! configured hour (for example across a restart) skips that day's send;
//! there is no catch-up.

use std::time::Duration;

use chrono::{Local, NaiveDateTime, Timelike};
use gobarber_core::alerts::EVENT_DAILY_SUMMARY;
use gobarber_core::preferences::AlertPreferences;
use gobarber_db::repositories::{ClientRepo, PreferencesRepo};
use gobarber_db::DbPool;
use tokio_util::sync::CancellationToken;

use crate::dispatcher::{DeliveryReport, Dispatcher};
use crate::error::NotifyError;
use crate::ledger::DedupLedger;
use crate::summary::aggregate;

/// How often the scheduler wakes up.
const TICK_INTERVAL: Duration = Duration::from_secs(3600);

// ---------------------------------------------------------------------------
// Gate
// ---------------------------------------------------------------------------

/// Result of the per-tick gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Frequency is `disabled`, or push delivery is not configured.
    Disabled,
    /// The current hour is not the configured notification hour.
    NotDueHour,
    /// The last summary is more recent than the frequency allows.
    AlreadySent,
    Due,
}

/// Decide whether the summary is due at `hour`, given the whole days since
/// the last summary (`None` if one was never sent).
pub fn evaluate_gate(
    prefs: &AlertPreferences,
    hour: u32,
    days_since_last: Option<i64>,
) -> GateState {
    let Some(min_days) = prefs.frequency.min_days_between() else {
        return GateState::Disabled;
    };
    if hour != prefs.notify_time.hour {
        return GateState::NotDueHour;
    }
    match days_since_last {
        Some(days) if days < min_days => GateState::AlreadySent,
        _ => GateState::Due,
    }
}

/// What a single tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The gate stopped the tick.
    Skipped(GateState),
    /// The summary was due but no client is eligible for any alert.
    NothingToSend,
    /// The summary was dispatched and recorded.
    Sent(DeliveryReport),
}

// ---------------------------------------------------------------------------
// NotificationScheduler
// ---------------------------------------------------------------------------

/// Background service that sends the aggregate summary when due.
pub struct NotificationScheduler {
    pool: DbPool,
    dispatcher: Dispatcher,
    ledger: DedupLedger,
}

impl NotificationScheduler {
    pub fn new(pool: DbPool, dispatcher: Dispatcher) -> Self {
        let ledger = DedupLedger::new(pool.clone());
        Self {
            pool,
            dispatcher,
            ledger,
        }
    }

    /// Run the scheduler loop.
    ///
    /// Ticks once per hour (the first tick fires immediately). The loop
    /// exits when the provided [`CancellationToken`] is cancelled.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(TICK_INTERVAL);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Notification scheduler cancelled");
                    break;
                }
                _ = interval.tick() => {
                    if let Err(e) = self.tick().await {
                        tracing::error!(error = %e, "Notification scheduler tick failed");
                    }
                }
            }
        }
    }

    /// Run one tick against the local wall clock.
    pub async fn tick(&self) -> Result<TickOutcome, NotifyError> {
        self.tick_at(Local::now().naive_local()).await
    }

    /// Run one tick as if the local time were `now`.
    pub async fn tick_at(&self, now: NaiveDateTime) -> Result<TickOutcome, NotifyError> {
        if !self.dispatcher.is_enabled() {
            return Ok(TickOutcome::Skipped(GateState::Disabled));
        }

        let prefs = PreferencesRepo::get_or_default(&self.pool)
            .await?
            .to_alert_preferences()?;
        let today = now.date();
        let days_since_last = self
            .ledger
            .days_since_last(EVENT_DAILY_SUMMARY, today)
            .await?;

        let state = evaluate_gate(&prefs, now.hour(), days_since_last);
        tracing::debug!(
            ?state,
            hour = now.hour(),
            frequency = %prefs.frequency,
            ?days_since_last,
            "Scheduler gate evaluated"
        );
        if state != GateState::Due {
            return Ok(TickOutcome::Skipped(state));
        }

        let clients = ClientRepo::list(&self.pool).await?;
        let Some(summary) = aggregate(&clients, today, &prefs) else {
            tracing::info!("No client alerts, nothing to send");
            return Ok(TickOutcome::NothingToSend);
        };

        let report = self.dispatcher.deliver(&summary).await?;
        self.ledger
            .mark_sent(EVENT_DAILY_SUMMARY, None, today)
            .await?;

        tracing::info!(
            title = %summary.title,
            sent = report.sent,
            total = report.total,
            "Daily summary sent"
        );
        Ok(TickOutcome::Sent(report))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
