use assetforge_core::dashboard::DEFAULT_TOP_N;
use assetforge_core::maintenance::DEFAULT_LOOKAHEAD_DAYS;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
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
    /// Upper bound on draining in-flight requests after a shutdown signal.
    pub shutdown_timeout_secs: u64,
    /// Days ahead of the due date at which an asset counts as Due Soon.
    pub maintenance_lookahead_days: i64,
    /// Default row count for the top-by-value and needs-maintenance lists.
    pub dashboard_top_n: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                    |
    /// |------------------------------|----------------------------|
    /// | `HOST`                       | `0.0.0.0`                  |
    /// | `PORT`                       | `3000`                     |
    /// | `CORS_ORIGINS`               | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`       | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`      | `30`                       |
    /// | `MAINTENANCE_LOOKAHEAD_DAYS` | `30`                       |
    /// | `DASHBOARD_TOP_N`            | `10`                       |
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

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let maintenance_lookahead_days: i64 = std::env::var("MAINTENANCE_LOOKAHEAD_DAYS")
            .map(|v| v.parse().expect("MAINTENANCE_LOOKAHEAD_DAYS must be a valid i64"))
            .unwrap_or(DEFAULT_LOOKAHEAD_DAYS);
        assert!(
            maintenance_lookahead_days >= 0,
            "MAINTENANCE_LOOKAHEAD_DAYS must not be negative"
        );

        let dashboard_top_n: i64 = std::env::var("DASHBOARD_TOP_N")
            .map(|v| v.parse().expect("DASHBOARD_TOP_N must be a valid i64"))
            .unwrap_or(DEFAULT_TOP_N);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            maintenance_lookahead_days,
            dashboard_top_n,
        }
    }
}
