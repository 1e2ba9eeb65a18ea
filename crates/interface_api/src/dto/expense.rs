//! Expense DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use core_kernel::temporal::flexible_date_option;
use core_kernel::ExpenseId;
use domain_finance::{Category, Expense, ExpensePatch, ExpenseQuery, NewExpense, SortOrder};

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateExpenseRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[validate(custom(function = "positive_amount"))]
    pub amount: Decimal,
    #[serde(default, with = "flexible_date_option")]
    pub date: Option<DateTime<Utc>>,
    pub category: Option<Category>,
}

impl From<CreateExpenseRequest> for NewExpense {
    fn from(request: CreateExpenseRequest) -> Self {
        NewExpense {
            name: request.name,
            amount: request.amount,
            date: request.date,
            category: request.category,
        }
    }
}

/// Sparse update; at least one field must be present
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
#[validate(schema(function = "patch_not_empty"))]
pub struct UpdateExpenseRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: Option<String>,
    /// Positivity is checked by the domain
    pub amount: Option<Decimal>,
    #[serde(default, with = "flexible_date_option")]
    pub date: Option<DateTime<Utc>>,
    pub category: Option<Category>,
}

impl From<UpdateExpenseRequest> for ExpensePatch {
    fn from(request: UpdateExpenseRequest) -> Self {
        ExpensePatch {
            name: request.name,
            amount: request.amount,
            date: request.date,
            category: request.category,
        }
    }
}

/// `GET /expenses` query string
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListExpensesQuery {
    pub year: Option<i32>,
    #[validate(range(min = 1, max = 12, message = "must be between 1 and 12"))]
    pub month: Option<u32>,
    /// `NEWEST`, anything else sorts by amount
    pub sort: Option<String>,
}

impl From<ListExpensesQuery> for ExpenseQuery {
    fn from(query: ListExpensesQuery) -> Self {
        ExpenseQuery {
            year: query.year,
            month: query.month,
            sort: SortOrder::parse_lenient(query.sort.as_deref()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    pub id: ExpenseId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    pub category: Category,
}

impl From<Expense> for ExpenseResponse {
    fn from(expense: Expense) -> Self {
        Self {
            id: expense.id,
            name: expense.name,
            amount: expense.amount,
            date: expense.date,
            category: expense.category,
        }
    }
}

fn positive_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_positive() && !amount.is_zero() {
        return Ok(());
    }
    let mut error = ValidationError::new("positive");
    error.message = Some("must be greater than zero".into());
    Err(error)
}

fn patch_not_empty(request: &UpdateExpenseRequest) -> Result<(), ValidationError> {
    if request.name.is_some() || request.amount.is_some() || request.date.is_some() || request.category.is_some() {
        return Ok(());
    }
    let mut error = ValidationError::new("empty_patch");
    error.message = Some("at least one field must be supplied".into());
    Err(error)
}
