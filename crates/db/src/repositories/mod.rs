//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&SqlitePool` as the first argument.

pub mod client_repo;
pub mod notification_ledger_repo;
pub mod preferences_repo;
pub mod push_subscription_repo;

pub use client_repo::ClientRepo;
pub use notification_ledger_repo::NotificationLedgerRepo;
pub use preferences_repo::PreferencesRepo;
pub use push_subscription_repo::PushSubscriptionRepo;
