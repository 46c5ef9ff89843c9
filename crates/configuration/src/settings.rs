use crate::error::ConfigError;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// The root configuration structure for the entire application.
///
/// Every section falls back to its `Default` impl, so an empty or missing
/// `config.toml` yields a runnable setup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub database: DatabaseConfig,
    pub client: ClientConfig,
    pub logging: LoggingConfig,
}

/// Settings for the quote server and its per-request deadlines.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Budget for the upstream call, measured from the start of the request.
    pub fetch_timeout_ms: u64,
    /// Budget for the insert. Always capped by the fetch deadline.
    pub persist_timeout_ms: u64,
}

/// Where the server gets its quotes from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub url: String,
    /// Key of the quote object inside the upstream response (e.g. "USDBRL").
    pub pair_key: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Settings for the one-shot requester.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub server_url: String,
    pub timeout_ms: u64,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Fallback filter directive when `RUST_LOG` is not set.
    pub level: String,
}

// --- Default Implementations ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            fetch_timeout_ms: 200,
            persist_timeout_ms: 10,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: "https://economia.awesomeapi.com.br/json/last/USD-BRL".to_string(),
            pair_key: "USDBRL".to_string(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://data.db".to_string(),
            max_connections: 5,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8080/cotacao".to_string(),
            timeout_ms: 300,
            output_path: PathBuf::from("cotacao.txt"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn persist_timeout(&self) -> Duration {
        Duration::from_millis(self.persist_timeout_ms)
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Config {
    /// Rejects settings that would make every request fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            (self.server.fetch_timeout_ms == 0, "server.fetch_timeout_ms must be greater than zero"),
            (self.server.persist_timeout_ms == 0, "server.persist_timeout_ms must be greater than zero"),
            (self.client.timeout_ms == 0, "client.timeout_ms must be greater than zero"),
            (self.database.max_connections == 0, "database.max_connections must be greater than zero"),
            (self.upstream.url.trim().is_empty(), "upstream.url must not be empty"),
            (self.upstream.pair_key.trim().is_empty(), "upstream.pair_key must not be empty"),
            (self.database.url.trim().is_empty(), "database.url must not be empty"),
            (self.client.server_url.trim().is_empty(), "client.server_url must not be empty"),
        ];

        match checks.iter().find(|(failed, _)| *failed) {
            Some((_, message)) => Err(ConfigError::ValidationError(message.to_string())),
            None => Ok(()),
        }
    }
}
