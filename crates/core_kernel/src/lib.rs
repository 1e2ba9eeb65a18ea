//! Core Kernel - Foundational types and utilities for the finance tracker
//!
//! This crate provides the building blocks shared by every other crate:
//! - Strongly-typed identifiers for users and expenses
//! - Calendar helpers (year/month periods, epoch seconds, lenient date parsing)
//! - Port abstractions and the unified port error type

pub mod identifiers;
pub mod temporal;
pub mod ports;
pub mod error;

pub use identifiers::{ExpenseId, UserId};
pub use temporal::{YearMonth, TemporalError};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
pub use error::CoreError;
