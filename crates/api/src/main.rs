use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gobarber_api::background::ledger_retention;
use gobarber_api::config::ServerConfig;
use gobarber_api::router::build_app_router;
use gobarber_api::state::AppState;
use gobarber_db::DbPool;
use gobarber_events::{Dispatcher, NotificationScheduler, VapidConfig, WebPushTransport};

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "gobarber_api=debug,gobarber_events=debug,tower_http=debug";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    init_tracing();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        database_url = %config.database_url,
        "Loaded server configuration"
    );

    // --- Database ---
    let pool = gobarber_db::create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    gobarber_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    gobarber_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Push delivery ---
    let vapid = VapidConfig::from_env();
    let dispatcher = build_dispatcher(&pool, vapid.as_ref());

    // --- Background jobs ---
    let cancel = CancellationToken::new();

    let scheduler_handle = if dispatcher.is_enabled() {
        let scheduler = NotificationScheduler::new(pool.clone(), dispatcher.clone());
        let scheduler_cancel = cancel.clone();
        Some(tokio::spawn(async move {
            scheduler.run(scheduler_cancel).await;
        }))
    } else {
        None
    };

    let retention_handle = tokio::spawn(ledger_retention::run(
        pool.clone(),
        config.ledger_retention_days,
        cancel.clone(),
    ));

    tracing::info!(
        scheduler = scheduler_handle.is_some(),
        "Background services started"
    );

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        dispatcher,
        vapid_public_key: vapid.map(|v| v.public_key),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    cancel.cancel();
    if let Some(handle) = scheduler_handle {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
    }
    let _ = tokio::time::timeout(Duration::from_secs(5), retention_handle).await;

    tracing::info!("Graceful shutdown complete");
}

/// Install the global subscriber. `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Build the push dispatcher, disabled when VAPID keys are missing or the
/// HTTP client cannot be created.
fn build_dispatcher(pool: &DbPool, vapid: Option<&VapidConfig>) -> Dispatcher {
    let Some(vapid) = vapid else {
        tracing::warn!("VAPID keys not configured, push notifications disabled");
        return Dispatcher::disabled(pool.clone());
    };

    match WebPushTransport::new(vapid) {
        Ok(transport) => {
            tracing::info!(
                subject = %vapid.subject,
                timeout_secs = vapid.timeout.as_secs(),
                "Push notifications enabled"
            );
            Dispatcher::new(pool.clone(), Arc::new(transport), vapid.timeout)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to build push client, push notifications disabled");
            Dispatcher::disabled(pool.clone())
        }
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
