#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use gobarber_api::config::ServerConfig;
use gobarber_api::router::build_app_router;
use gobarber_api::state::AppState;
use gobarber_db::models::push_subscription::PushSubscription;
use gobarber_events::{Dispatcher, PushError, PushTransport};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: "sqlite::memory:".to_string(),
        ledger_retention_days: 90,
    }
}

/// Push transport that records endpoints and answers 410 for configured ones.
#[derive(Default)]
pub struct MockTransport {
    pub sent: Mutex<Vec<String>>,
    pub gone: Vec<String>,
}

impl MockTransport {
    pub fn with_gone(endpoints: &[&str]) -> Self {
        Self {
            sent: Mutex::default(),
            gone: endpoints.iter().map(|e| e.to_string()).collect(),
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl PushTransport for MockTransport {
    async fn send(&self, subscription: &PushSubscription, _payload: &str) -> Result<(), PushError> {
        self.sent.lock().unwrap().push(subscription.endpoint.clone());
        if self.gone.contains(&subscription.endpoint) {
            return Err(PushError::from_status(410, "Gone"));
        }
        Ok(())
    }
}

/// Build the full application router around an explicit dispatcher.
pub fn build_app(pool: SqlitePool, dispatcher: Dispatcher) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        dispatcher,
        vapid_public_key: Some("test-public-key".to_string()),
    };
    build_app_router(state, &config)
}

/// Build the application with a recording push transport.
pub fn build_test_app_with(pool: SqlitePool, transport: Arc<MockTransport>) -> Router {
    let dispatcher = Dispatcher::new(pool.clone(), transport, Duration::from_secs(5));
    build_app(pool, dispatcher)
}

/// Build the application with a transport that accepts everything.
pub fn build_test_app(pool: SqlitePool) -> Router {
    build_test_app_with(pool, Arc::new(MockTransport::default()))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response {
    send(app, Method::POST, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
