//! Ports and Adapters Infrastructure
//!
//! The domain talks to storage only through port traits. Adapters implement
//! those traits for a concrete backend (an in-memory table for offline runs and
//! tests, PostgreSQL in production).
//!
//! ```text
//! ┌──────────────────────────────┐
//! │   FinanceService (domain)    │
//! └──────────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────┐
//! │      TablePort (trait)       │
//! └──────────────────────────────┘
//!        ▲                 ▲
//!        │                 │
//! ┌──────┴──────┐   ┌──────┴──────────┐
//! │InMemoryTable│   │PostgresTable    │
//! └─────────────┘   └─────────────────┘
//! ```

use thiserror::Error;
use serde::{Deserialize, Serialize};

/// Error type for port operations
///
/// Every adapter reports failures through this type so the domain can handle
/// them uniformly.
#[derive(Debug, Error)]
pub enum PortError {
    /// The request handed to the adapter was malformed
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// A conditional write was rejected because its condition did not hold
    #[error("Condition failed: {message}")]
    ConditionFailed {
        message: String,
    },

    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The backend did not answer in time
    #[error("Timed out: {operation}")]
    Timeout {
        operation: String,
    },

    /// Stored data could not be converted
    #[error("Transformation error: {message}")]
    Transformation {
        message: String,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Creates a Validation error with field information
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Creates a ConditionFailed error
    pub fn condition_failed(message: impl Into<String>) -> Self {
        PortError::ConditionFailed {
            message: message.into(),
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a Timeout error
    pub fn timeout(operation: impl Into<String>) -> Self {
        PortError::Timeout {
            operation: operation.into(),
        }
    }

    /// Creates a Transformation error
    pub fn transformation(message: impl Into<String>) -> Self {
        PortError::Transformation {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error indicates a transient failure that may succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PortError::Connection { .. } | PortError::Timeout { .. }
        )
    }

    /// Returns true if a write condition rejected the operation
    pub fn is_condition_failed(&self) -> bool {
        matches!(self, PortError::ConditionFailed { .. })
    }
}

/// Marker trait for all domain ports
///
/// Ports are shared across request handlers, so they must be thread-safe.
pub trait DomainPort: Send + Sync + 'static {}

/// Health status for an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    Healthy,
    Degraded,
    Unhealthy,
    Unknown,
}

/// Health check result for an adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    /// Adapter identifier
    pub adapter_id: String,
    /// Current health status
    pub status: AdapterHealth,
    /// Latency of the health check in milliseconds
    pub latency_ms: u64,
    /// Optional message with additional details
    pub message: Option<String>,
    /// Timestamp of the health check
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl HealthCheckResult {
    pub fn is_healthy(&self) -> bool {
        self.status == AdapterHealth::Healthy
    }
}

/// Trait for adapters that support health checks
#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    /// Performs a health check on the adapter
    async fn health_check(&self) -> HealthCheckResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_transient() {
        let timeout = PortError::timeout("acquire connection");
        assert!(timeout.is_transient());
        assert_eq!(timeout.to_string(), "Timed out: acquire connection");
        assert!(PortError::connection("refused").is_transient());
        assert!(!PortError::validation("missing PK").is_transient());
    }

    #[test]
    fn test_condition_failed() {
        let error = PortError::condition_failed("item exists");
        assert!(error.is_condition_failed());
        assert!(!error.is_transient());
    }
}
