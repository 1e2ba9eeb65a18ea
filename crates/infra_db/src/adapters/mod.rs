//! Domain Adapters
//!
//! Implementations of the finance domain's ports on top of the repositories.

pub mod table;

pub use table::PostgresTableAdapter;
