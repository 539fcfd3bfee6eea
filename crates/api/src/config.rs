use skintone_core::batch::MAX_BATCH_CHUNK;

use crate::auth::jwt::JwtConfig;

const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Bound on each individual store call in seconds; `0` disables it (default: `10`).
    pub store_timeout_secs: u64,
    /// Largest accepted request body in bytes (default: 16 MiB).
    pub max_body_bytes: usize,
    /// Records per atomic bulk commit, clamped to `1..=500` (default: `500`).
    pub bulk_chunk_size: usize,
    /// PostgreSQL URL. When unset the in-memory store is used.
    pub database_url: Option<String>,
    /// Emit JSON log lines instead of the human-readable format.
    pub log_json: bool,
    /// JWT token configuration.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `STORE_TIMEOUT_SECS`   | `10`                       |
    /// | `BULK_CHUNK_SIZE`      | `500`                      |
    /// | `MAX_BODY_BYTES`       | `16777216`                 |
    /// | `DATABASE_URL`         | unset (in-memory store)    |
    /// | `LOG_FORMAT`           | `pretty` (`json` to switch)|
    ///
    /// # Panics
    ///
    /// Panics on unparseable numbers or a missing `JWT_SECRET`; misconfiguration
    /// should stop the process at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let store_timeout_secs: u64 = std::env::var("STORE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("STORE_TIMEOUT_SECS must be a valid u64");

        let bulk_chunk_size: usize = std::env::var("BULK_CHUNK_SIZE")
            .unwrap_or_else(|_| MAX_BATCH_CHUNK.to_string())
            .parse()
            .expect("BULK_CHUNK_SIZE must be a valid usize");

        let max_body_bytes: usize = std::env::var("MAX_BODY_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_BODY_BYTES.to_string())
            .parse()
            .expect("MAX_BODY_BYTES must be a valid usize");

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let log_json = std::env::var("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            request_timeout_secs,
            store_timeout_secs,
            max_body_bytes,
            bulk_chunk_size,
            database_url,
            log_json,
            jwt,
        }
    }
}
