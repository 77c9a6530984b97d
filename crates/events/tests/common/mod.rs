//! Shared fixtures for notification engine tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use gobarber_core::preferences::AlertPreferences;
use gobarber_core::types::DbId;
use gobarber_db::models::client::CreateClient;
use gobarber_db::models::push_subscription::PushSubscription;
use gobarber_db::repositories::{ClientRepo, PreferencesRepo, PushSubscriptionRepo};
use gobarber_events::{Dispatcher, PushError, PushTransport};
use sqlx::SqlitePool;

/// Per-attempt timeout used by test dispatchers.
pub const TEST_TIMEOUT: Duration = Duration::from_millis(200);

/// Push transport that records every send and fails on configured endpoints.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<(String, serde_json::Value)>>,
    failures: HashMap<String, PushError>,
    delay: Option<Duration>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every send to `endpoint` fail with `error`.
    pub fn failing(mut self, endpoint: &str, error: PushError) -> Self {
        self.failures.insert(endpoint.to_string(), error);
        self
    }

    /// Sleep before answering, to exercise the dispatcher timeout.
    pub fn slow(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Endpoint and decoded payload of every attempted send, in order.
    pub fn sent(&self) -> Vec<(String, serde_json::Value)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl PushTransport for RecordingTransport {
    async fn send(&self, subscription: &PushSubscription, payload: &str) -> Result<(), PushError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let json = serde_json::from_str(payload).expect("payload should be JSON");
        self.sent
            .lock()
            .unwrap()
            .push((subscription.endpoint.clone(), json));

        match self.failures.get(&subscription.endpoint) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

/// Build an enabled dispatcher around `transport`.
pub fn dispatcher(pool: &SqlitePool, transport: Arc<RecordingTransport>) -> Dispatcher {
    Dispatcher::new(pool.clone(), transport, TEST_TIMEOUT)
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    date.and_hms_opt(hour, minute, 0).unwrap()
}

pub async fn seed_client(
    pool: &SqlitePool,
    name: &str,
    birthday: &str,
    last_cut: Option<&str>,
) -> DbId {
    let input = CreateClient {
        name: name.to_string(),
        phone: None,
        birthday: birthday.to_string(),
        last_cut: last_cut.map(str::to_string),
    };
    ClientRepo::create(pool, &input).await.unwrap().id
}

pub async fn subscribe(pool: &SqlitePool, endpoint: &str) -> DbId {
    PushSubscriptionRepo::upsert(pool, endpoint, "p256dh", "auth")
        .await
        .unwrap()
}

pub async fn set_preferences(pool: &SqlitePool, prefs: AlertPreferences) {
    PreferencesRepo::replace(pool, &prefs).await.unwrap();
}
