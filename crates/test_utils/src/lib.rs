//! Test Utilities Crate
//!
//! Shared test infrastructure for the finance tracker test suites.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built users, dates and expenses, plus a ready service
//! - `builders`: Builder for expense requests with sensible defaults
//! - `assertions`: Ordering and overview assertions with readable failures
//! - `generators`: Property-based test data generators
//! - `database`: Migrated PostgreSQL databases for integration tests

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;
pub mod database;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
pub use database::{test_database_or_skip, TestDatabase, TestDatabaseError};
