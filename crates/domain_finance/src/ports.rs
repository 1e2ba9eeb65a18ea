//! Finance Domain Ports
//!
//! The finance domain needs exactly one thing from storage: a single wide
//! key-value table with point reads and writes on the primary key and
//! equality queries on three sparse secondary indexes. `TablePort` describes
//! that contract; `InMemoryTable` and the PostgreSQL adapter in `infra_db`
//! implement it.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_finance::{FinanceService, TablePort};
//! use std::sync::Arc;
//!
//! let table: Arc<dyn TablePort> = match config.store {
//!     StoreBackend::Memory => Arc::new(InMemoryTable::new()),
//!     StoreBackend::Postgres => Arc::new(PostgresTableAdapter::new(pool)),
//! };
//! let service = FinanceService::new(table);
//! ```

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, PortError};

use crate::table::{IndexQuery, Item, ItemUpdate, PrimaryKey, WriteCondition};

/// Single-table storage contract
///
/// Writes are atomic per record. Conditional writes that find their
/// condition violated fail with `PortError::ConditionFailed`. Index queries
/// may not yet reflect the latest writes.
#[async_trait]
pub trait TablePort: DomainPort + HealthCheckable {
    /// Writes a whole record, replacing any existing one with the same key
    ///
    /// The item must carry string `PK` and `SK` attributes.
    async fn put_item(&self, item: Item, condition: WriteCondition) -> Result<(), PortError>;

    /// Point lookup by primary key
    async fn get_item(&self, key: &PrimaryKey) -> Result<Option<Item>, PortError>;

    /// Sets the given attributes on one record, leaving the others untouched
    async fn update_item(&self, update: ItemUpdate) -> Result<(), PortError>;

    /// Removes a record, returning it if it existed
    async fn delete_item(&self, key: &PrimaryKey) -> Result<Option<Item>, PortError>;

    /// Equality query on a secondary index, ordered by the index sort attribute
    ///
    /// Records without the index partition attribute are never returned. Ties
    /// on the sort attribute are ordered by primary key.
    async fn query(&self, query: &IndexQuery) -> Result<Vec<Item>, PortError>;
}
