//! Domain logic for the GoBarber client manager.
//!
//! This crate has zero internal deps and performs no I/O, so the
//! repository layer, the notification engine and the HTTP handlers can all
//! share it.

pub mod alerts;
pub mod clients;
pub mod dashboard;
pub mod dates;
pub mod eligibility;
pub mod error;
pub mod preferences;
pub mod types;
