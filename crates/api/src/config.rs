/// Default SQLite database location, created on first start.
const DEFAULT_DATABASE_URL: &str = "sqlite://data/gobarber.sqlite?mode=rwc";

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// SQLite connection URL.
    pub database_url: String,
    /// Days of `notifications_sent` history kept by the retention job.
    pub ledger_retention_days: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                                  |
    /// |-------------------------|------------------------------------------|
    /// | `HOST`                  | `0.0.0.0`                                |
    /// | `PORT`                  | `3000`                                   |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`                  |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                                     |
    /// | `DATABASE_URL`          | `sqlite://data/gobarber.sqlite?mode=rwc` |
    /// | `LEDGER_RETENTION_DAYS` | `90`                                     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.into());

        let ledger_retention_days: i64 = std::env::var("LEDGER_RETENTION_DAYS")
            .unwrap_or_else(|_| "90".into())
            .parse()
            .expect("LEDGER_RETENTION_DAYS must be a valid integer");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            ledger_retention_days,
        }
    }
}
