//! Database connection pool management
//!
//! Pool settings, pool creation and the embedded migrations for the
//! `finance_app` table.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

use crate::error::DatabaseError;

/// Type alias for the PostgreSQL connection pool
pub type DatabasePool = PgPool;

/// Connection pool settings
///
/// ```rust
/// use infra_db::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::new("postgres://localhost/finance")
///     .max_connections(20)
///     .connect_timeout(Duration::from_secs(5));
/// assert_eq!(config.max_connections, 20);
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string
    pub url: String,
    /// Upper bound on open connections
    pub max_connections: u32,
    /// Connections kept open while idle
    pub min_connections: u32,
    /// How long to wait when acquiring a connection
    pub connect_timeout: Duration,
    /// Age after which a connection is recycled
    pub max_lifetime: Duration,
    /// Idle time after which a surplus connection is closed
    pub idle_timeout: Duration,
}

impl DatabaseConfig {
    /// Settings for the database at `url`
    ///
    /// # Arguments
    ///
    /// * `url` - connection string, e.g. `postgres://finance:secret@db/finance`
    ///
    /// # Returns
    ///
    /// A config with 1 to 10 connections, a 10 s acquire timeout, 30 min
    /// connection lifetime and 10 min idle timeout
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout: Duration::from_secs(10),
            max_lifetime: Duration::from_secs(30 * 60),
            idle_timeout: Duration::from_secs(10 * 60),
        }
    }

    /// # Arguments
    ///
    /// * `max` - upper bound on open connections (default: 10)
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// # Arguments
    ///
    /// * `min` - connections kept open while idle (default: 1)
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// # Arguments
    ///
    /// * `timeout` - acquire wait before giving up (default: 10 s)
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// # Arguments
    ///
    /// * `lifetime` - age at which a connection is recycled (default: 30 min)
    pub fn max_lifetime(mut self, lifetime: Duration) -> Self {
        self.max_lifetime = lifetime;
        self
    }

    /// # Arguments
    ///
    /// * `timeout` - idle time before a surplus connection closes (default: 10 min)
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::new("postgres://localhost/finance")
    }
}

/// Opens a connection pool
///
/// # Returns
///
/// A connected pool holding at least `min_connections` connections
///
/// # Errors
///
/// `DatabaseError::ConnectionFailed` if no connection can be established.
pub async fn create_pool(config: DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Creating database pool"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.connect_timeout)
        .max_lifetime(config.max_lifetime)
        .idle_timeout(config.idle_timeout)
        .connect(&config.url)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!("Database pool created");
    Ok(pool)
}

/// Creates the `finance_app` table and its indexes if missing
///
/// # Errors
///
/// `DatabaseError::MigrationFailed` if a migration does not apply or the
/// recorded history disagrees with the embedded one.
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), DatabaseError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
    info!("Database migrations applied");
    Ok(())
}
