//! Application configuration loaded from environment variables.

use std::time::Duration;

use projector::DisplayNameFormat;

/// Process configuration, read once at startup and passed into each
/// component's constructor.
///
/// Environment variables:
/// - `BROKER_ADDRESSES` — comma-separated broker address list
/// - `ENRICHMENT_URL` — users query service address (default: `"127.0.0.1:8081"`)
/// - `ENRICHMENT_TIMEOUT_MS` — profile lookup deadline (default: `5000`)
/// - `STORAGE_URL` — PostgreSQL server connection string; when unset the
///   process runs on the in-memory store
/// - `STORAGE_DB` — database name (default: `"answers"`)
/// - `DISPLAY_NAME_FORMAT` — `literal` or `trimmed` (default: `literal`)
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `8080`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub broker_addresses: Vec<String>,
    pub enrichment_url: String,
    pub enrichment_timeout: Duration,
    pub storage_url: Option<String>,
    pub storage_db: String,
    pub display_name_format: DisplayNameFormat,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Loads configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            broker_addresses: std::env::var("BROKER_ADDRESSES")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or(defaults.broker_addresses),
            enrichment_url: std::env::var("ENRICHMENT_URL").unwrap_or(defaults.enrichment_url),
            enrichment_timeout: std::env::var("ENRICHMENT_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.enrichment_timeout),
            storage_url: std::env::var("STORAGE_URL").ok(),
            storage_db: std::env::var("STORAGE_DB").unwrap_or(defaults.storage_db),
            display_name_format: std::env::var("DISPLAY_NAME_FORMAT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.display_name_format),
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            broker_addresses: Vec::new(),
            enrichment_url: "127.0.0.1:8081".to_string(),
            enrichment_timeout: Duration::from_millis(5000),
            storage_url: None,
            storage_db: "answers".to_string(),
            display_name_format: DisplayNameFormat::Literal,
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}
