/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In production,
/// override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Graceful shutdown timeout in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Draft store backend URL (default: `memory://`).
    pub draft_store_url: String,
    /// Default draft lifetime in seconds (default: `86400`).
    pub draft_ttl_secs: i64,
    /// Commit lock lifetime in seconds (default: `30`).
    pub commit_lock_ttl_secs: i64,
    /// Shared secret for the internal commit endpoint.
    pub internal_commit_token: String,
    /// Public base URL of the asset (blob metadata) service. When unset,
    /// the in-process asset registry is used.
    pub asset_base_url: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `3000`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                    |
    /// | `DRAFT_STORE_URL`       | `memory://`             |
    /// | `DRAFT_TTL_SECS`        | `86400`                 |
    /// | `COMMIT_LOCK_TTL_SECS`  | `30`                    |
    /// | `INTERNAL_COMMIT_TOKEN` | `dev-internal-token`    |
    /// | `ASSET_BASE_URL`        | unset                   |
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

        let draft_store_url =
            std::env::var("DRAFT_STORE_URL").unwrap_or_else(|_| "memory://".into());

        let draft_ttl_secs: i64 = std::env::var("DRAFT_TTL_SECS")
            .unwrap_or_else(|_| "86400".into())
            .parse()
            .expect("DRAFT_TTL_SECS must be a valid i64");
        assert!(draft_ttl_secs > 0, "DRAFT_TTL_SECS must be positive");

        let commit_lock_ttl_secs: i64 = std::env::var("COMMIT_LOCK_TTL_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("COMMIT_LOCK_TTL_SECS must be a valid i64");

        let internal_commit_token = std::env::var("INTERNAL_COMMIT_TOKEN")
            .unwrap_or_else(|_| "dev-internal-token".into());

        let asset_base_url = std::env::var("ASSET_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            draft_store_url,
            draft_ttl_secs,
            commit_lock_ttl_secs,
            internal_commit_token,
            asset_base_url,
        }
    }
}
