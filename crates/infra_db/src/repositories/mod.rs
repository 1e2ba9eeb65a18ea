//! Repository implementations
//!
//! Repositories own the SQL. They speak in rows and `DatabaseError` and know
//! nothing of ports; the adapters in [`crate::adapters`] translate.

pub mod single_table;

pub use single_table::SingleTableRepository;
