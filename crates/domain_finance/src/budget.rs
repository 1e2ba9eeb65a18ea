//! Per-user monthly budget

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::FinanceError;

/// Budget every user starts with until they set their own
pub const DEFAULT_BUDGET: Decimal = dec!(1000);

/// A user's monthly budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    pub amount: Decimal,
}

impl Budget {
    /// Creates a budget, rejecting negative amounts
    pub fn new(amount: Decimal) -> Result<Self, FinanceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(FinanceError::validation("budget", "must not be negative"));
        }
        Ok(Self { amount })
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            amount: DEFAULT_BUDGET,
        }
    }
}
