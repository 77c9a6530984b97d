//! GoBarber notification engine.
//!
//! This crate turns client records and the singleton preferences row into
//! push notifications:
//!
//! - [`summary`]: runs the eligibility evaluator over every client and
//!   builds the aggregate summary payload.
//! - [`DedupLedger`]: at-most-once-per-day bookkeeping on top of the
//!   `notifications_sent` table.
//! - [`Dispatcher`]: fans a payload out to every push subscription with
//!   per-endpoint failure isolation and dead-endpoint cleanup.
//! - [`delivery`]: the [`PushTransport`] seam and its Web Push implementation.
//! - [`NotificationScheduler`]: hourly gate that sends the summary when due.
//! - [`OnDemandTrigger`]: manual per-client sends that bypass all gating.

pub mod delivery;
pub mod dispatcher;
pub mod error;
pub mod ledger;
pub mod payload;
pub mod scheduler;
pub mod summary;
pub mod trigger;

pub use delivery::webpush::{VapidConfig, WebPushTransport};
pub use delivery::{PushError, PushTransport};
pub use dispatcher::{DeliveryReport, DeliveryResult, Dispatcher};
pub use error::NotifyError;
pub use ledger::DedupLedger;
pub use payload::PushPayload;
pub use scheduler::{GateState, NotificationScheduler, TickOutcome};
pub use trigger::{OnDemandTrigger, TriggerResult};
