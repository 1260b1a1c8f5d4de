//! # Service configuration
//!
//! Read once from the environment at startup and carried in the shared
//! state. Nothing else in the service touches `std::env`.

use obi_vc::DEFAULT_CACHE_TIMEOUT_MS;

/// Runtime configuration for the API service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TCP port to bind.
    pub port: u16,
    /// Scheme used when assembling hosted-document URLs (`https` in any
    /// real deployment; `http` only for local work).
    pub http_protocol: String,
    /// Credential cache lifetime in milliseconds.
    pub cache_timeout_ms: i64,
    /// Postgres connection string; absent means in-memory-only mode.
    pub database_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            http_protocol: "https".to_string(),
            cache_timeout_ms: DEFAULT_CACHE_TIMEOUT_MS,
            database_url: None,
        }
    }
}

impl AppConfig {
    /// Build the configuration from environment variables, falling back
    /// to defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: std::env::var("OBI_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            http_protocol: std::env::var("OBI_HTTP_PROTOCOL").unwrap_or(defaults.http_protocol),
            cache_timeout_ms: std::env::var("OBI_CREDENTIAL_CACHE_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_timeout_ms),
            database_url: std::env::var("DATABASE_URL").ok(),
        }
    }
}
