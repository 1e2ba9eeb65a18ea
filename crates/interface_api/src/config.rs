//! API configuration

use serde::Deserialize;

/// Which [`TablePort`](domain_finance::TablePort) implementation backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local table, lost on restart
    #[default]
    Memory,
    Postgres,
}

/// API configuration
///
/// Every key is optional; missing ones fall back to [`ApiConfig::default`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// HS256 secret for bearer tokens
    pub jwt_secret: String,
    /// Used when `store` is `postgres`
    pub database_url: String,
    pub database_max_connections: u32,
    pub log_level: String,
    /// Emit logs as JSON lines instead of text
    pub log_json: bool,
    /// Skip token checks and act as the fixed offline user
    pub offline: bool,
    pub store: StoreBackend,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            database_url: "postgres://localhost/finance".to_string(),
            database_max_connections: 10,
            log_level: "info".to_string(),
            log_json: false,
            offline: false,
            store: StoreBackend::Memory,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
