pub mod clients;
pub mod dashboard;
pub mod notifications;
pub mod preferences;
