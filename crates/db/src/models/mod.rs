//! Row models and request DTOs, one module per table.

pub mod client;
pub mod notification_ledger;
pub mod preferences;
pub mod push_subscription;
