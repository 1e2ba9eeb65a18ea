//! Infrastructure Database Layer
//!
//! PostgreSQL storage for the finance domain's single table, using SQLx.
//!
//! # Storage Model
//!
//! Every record lives in one table, `finance_app`, keyed by `(pk, sk)`. The
//! remaining attributes are kept in a JSONB column in their tagged form
//! (`{"S": "..."}` or `{"N": "..."}`), so the secondary indexes of the
//! domain become partial expression indexes over that column.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresTableAdapter};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/finance")).await?;
//! run_migrations(&pool).await?;
//! let table = PostgresTableAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use repositories::SingleTableRepository;
pub use adapters::PostgresTableAdapter;
