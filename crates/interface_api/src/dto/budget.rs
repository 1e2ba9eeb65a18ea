//! Budget DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use domain_finance::Budget;

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateBudgetRequest {
    #[validate(custom(function = "non_negative"))]
    pub budget: Decimal,
}

#[derive(Debug, Serialize)]
pub struct BudgetResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub budget: Decimal,
}

impl From<Budget> for BudgetResponse {
    fn from(budget: Budget) -> Self {
        Self { budget: budget.amount }
    }
}

fn non_negative(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        let mut error = ValidationError::new("non_negative");
        error.message = Some("must not be negative".into());
        return Err(error);
    }
    Ok(())
}
