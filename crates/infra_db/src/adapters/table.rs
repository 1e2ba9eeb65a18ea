//! PostgreSQL Table Adapter
//!
//! Implements [`TablePort`] with the [`SingleTableRepository`]. Violated
//! write conditions surface as `PortError::ConditionFailed`; database errors
//! are translated with [`db_to_port_error`].
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_finance::{FinanceService, TablePort};
//! use infra_db::PostgresTableAdapter;
//! use std::sync::Arc;
//!
//! let table: Arc<dyn TablePort> = Arc::new(PostgresTableAdapter::new(pool));
//! let service = FinanceService::new(table);
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::instrument;

use core_kernel::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_finance::table::attr;
use domain_finance::{AttributeValue, IndexQuery, Item, ItemUpdate, PrimaryKey, TablePort, WriteCondition};

use crate::error::db_to_port_error;
use crate::repositories::SingleTableRepository;

const ADAPTER_ID: &str = "postgres-table";

/// PostgreSQL-backed implementation of [`TablePort`]
#[derive(Debug, Clone)]
pub struct PostgresTableAdapter {
    repository: SingleTableRepository,
}

impl PostgresTableAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: SingleTableRepository::new(pool),
        }
    }
}

fn condition_failed(key: &PrimaryKey, condition: WriteCondition) -> PortError {
    match condition {
        WriteCondition::ItemExists => PortError::condition_failed(format!("no item with key {}", key)),
        _ => PortError::condition_failed(format!("item with key {} already exists", key)),
    }
}

impl DomainPort for PostgresTableAdapter {}

#[async_trait]
impl HealthCheckable for PostgresTableAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();
        let result = self.repository.ping().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        let (status, message) = match result {
            Ok(()) => (AdapterHealth::Healthy, None),
            Err(e) => (AdapterHealth::Unhealthy, Some(format!("Database error: {}", e))),
        };
        HealthCheckResult {
            adapter_id: ADAPTER_ID.to_string(),
            status,
            latency_ms,
            message,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl TablePort for PostgresTableAdapter {
    #[instrument(skip_all, fields(condition = ?condition))]
    async fn put_item(&self, item: Item, condition: WriteCondition) -> Result<(), PortError> {
        let key = PrimaryKey::of_item(&item)
            .ok_or_else(|| PortError::validation_field("item must carry string keys", attr::PK))?;

        let applied = self
            .repository
            .put(&key, &item, condition)
            .await
            .map_err(db_to_port_error)?;
        if applied {
            Ok(())
        } else {
            Err(condition_failed(&key, condition))
        }
    }

    #[instrument(skip_all, fields(key = %key))]
    async fn get_item(&self, key: &PrimaryKey) -> Result<Option<Item>, PortError> {
        self.repository.get(key).await.map_err(db_to_port_error)
    }

    #[instrument(skip_all, fields(key = %update.key, condition = ?update.condition))]
    async fn update_item(&self, update: ItemUpdate) -> Result<(), PortError> {
        if update.set.contains_key(attr::PK) || update.set.contains_key(attr::SK) {
            return Err(PortError::validation("key attributes cannot be updated"));
        }

        let ItemUpdate { key, mut set, condition } = update;
        set.insert(attr::PK.to_string(), AttributeValue::S(key.pk.clone()));
        set.insert(attr::SK.to_string(), AttributeValue::S(key.sk.clone()));

        let applied = self
            .repository
            .merge(&key, &set, condition)
            .await
            .map_err(db_to_port_error)?;
        if applied {
            Ok(())
        } else {
            Err(condition_failed(&key, condition))
        }
    }

    #[instrument(skip_all, fields(key = %key))]
    async fn delete_item(&self, key: &PrimaryKey) -> Result<Option<Item>, PortError> {
        self.repository.delete(key).await.map_err(db_to_port_error)
    }

    #[instrument(skip_all, fields(index = %query.index))]
    async fn query(&self, query: &IndexQuery) -> Result<Vec<Item>, PortError> {
        self.repository.query(query).await.map_err(db_to_port_error)
    }
}
