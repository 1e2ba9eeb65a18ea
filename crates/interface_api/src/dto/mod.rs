//! Request and response bodies
//!
//! Amounts are read from JSON numbers or strings and written as JSON numbers.

pub mod expense;
pub mod budget;
pub mod overview;

use serde::Serialize;

/// Acknowledgement of a write
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
