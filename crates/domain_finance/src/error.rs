//! Finance domain errors

use thiserror::Error;

use core_kernel::{ExpenseId, PortError, TemporalError};

/// Errors that can occur in the finance domain
#[derive(Debug, Error)]
pub enum FinanceError {
    /// No expense with this id exists for the user
    #[error("Expense not found: {0}")]
    ExpenseNotFound(ExpenseId),

    /// Input rejected before reaching the store
    #[error("Invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// A stored record could not be mapped back to a domain entity
    #[error("Corrupt record {key}: {reason}")]
    CorruptRecord {
        key: String,
        reason: String,
    },

    /// An aggregate left the representable amount range
    #[error("Arithmetic overflow in {0}")]
    Overflow(&'static str),

    /// The backing store failed
    #[error("Store error: {0}")]
    Store(#[from] PortError),
}

impl FinanceError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        FinanceError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn corrupt(key: impl Into<String>, reason: impl Into<String>) -> Self {
        FinanceError::CorruptRecord {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by the caller's input
    pub fn is_validation(&self) -> bool {
        matches!(self, FinanceError::Validation { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FinanceError::ExpenseNotFound(_))
    }
}

impl From<TemporalError> for FinanceError {
    fn from(err: TemporalError) -> Self {
        match err {
            TemporalError::InvalidMonth(_) => FinanceError::validation("month", err.to_string()),
            TemporalError::UnrecognisedDate(_) => FinanceError::validation("date", err.to_string()),
            TemporalError::EpochOutOfRange(_) => FinanceError::corrupt("EXPENSE_DATE", err.to_string()),
        }
    }
}
