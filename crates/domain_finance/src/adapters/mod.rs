//! Table Adapters Bundled With the Domain
//!
//! `InMemoryTable` implements [`TablePort`](crate::ports::TablePort) without
//! any external dependency. It serves offline mode and tests; the PostgreSQL
//! adapter lives in `infra_db`.

pub mod memory;

pub use memory::InMemoryTable;
