//! Property-Based Test Generators
//!
//! proptest strategies producing values that satisfy the domain invariants:
//! positive two-decimal amounts, whole-second UTC dates, non-empty names.

use chrono::{DateTime, TimeZone, Utc};
use core_kernel::{ExpenseId, UserId};
use domain_finance::{Category, Expense, NewExpense};
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Any category
pub fn category_strategy() -> impl Strategy<Value = Category> {
    proptest::sample::select(Category::ALL.to_vec())
}

/// Positive amount with two decimal places, 0.01 to 100000.00
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Whole-second instant within 2000..2100
pub fn date_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (946_684_800i64..4_102_444_800i64).prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
}

/// Whole-second instant within 2024
pub fn date_2024_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (1_704_067_200i64..1_735_689_600i64).prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
}

pub fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ]{0,30}"
}

/// Key-safe user id
pub fn user_id_strategy() -> impl Strategy<Value = UserId> {
    "[a-zA-Z0-9_-]{1,24}".prop_map(|s| UserId::parse(s).unwrap())
}

pub fn expense_id_strategy() -> impl Strategy<Value = ExpenseId> {
    any::<u128>().prop_map(|bits| ExpenseId::from_uuid(Uuid::from_u128(bits)))
}

/// Fully populated creation request
pub fn new_expense_strategy() -> impl Strategy<Value = NewExpense> {
    (name_strategy(), amount_strategy(), date_strategy(), category_strategy())
        .prop_map(|(name, amount, date, category)| {
            NewExpense::new(name, amount).with_date(date).with_category(category)
        })
}

/// Creation request dated within 2024
pub fn new_expense_2024_strategy() -> impl Strategy<Value = NewExpense> {
    (name_strategy(), amount_strategy(), date_2024_strategy(), category_strategy())
        .prop_map(|(name, amount, date, category)| {
            NewExpense::new(name, amount).with_date(date).with_category(category)
        })
}

/// Stored-form expense
pub fn expense_strategy() -> impl Strategy<Value = Expense> {
    (expense_id_strategy(), name_strategy(), amount_strategy(), date_strategy(), category_strategy())
        .prop_map(|(id, name, amount, date, category)| Expense { id, name, amount, date, category })
}
