//! Custom Test Assertions
//!
//! Assertion helpers for listing orders and overview cells that print the
//! offending values instead of a bare `false`.

use domain_finance::{Category, Expense, YearlyOverview};
use rust_decimal::Decimal;

/// Asserts amounts never decrease along the list
pub fn assert_amounts_ascending(expenses: &[Expense]) {
    for pair in expenses.windows(2) {
        assert!(
            pair[0].amount <= pair[1].amount,
            "Amounts out of order: {} ({}) before {} ({})",
            pair[0].name,
            pair[0].amount,
            pair[1].name,
            pair[1].amount
        );
    }
}

/// Asserts dates never increase along the list
pub fn assert_newest_first(expenses: &[Expense]) {
    for pair in expenses.windows(2) {
        assert!(
            pair[0].date >= pair[1].date,
            "Dates out of order: {} ({}) before {} ({})",
            pair[0].name,
            pair[0].date,
            pair[1].name,
            pair[1].date
        );
    }
}

/// Asserts one overview cell, month given zero-based
pub fn assert_overview_cell(overview: &YearlyOverview, month_index: usize, category: Category, expected: Decimal) {
    let actual = overview
        .month(month_index)
        .unwrap_or_else(|| panic!("No month at index {}", month_index))
        .get(category);
    assert_eq!(
        actual, expected,
        "Overview {} month {} category {}: expected {}, got {}",
        overview.year(),
        month_index,
        category,
        expected,
        actual
    );
}

/// Asserts the overview has 12 months and every cell is zero
pub fn assert_overview_empty(overview: &YearlyOverview) {
    assert_eq!(overview.months().len(), 12);
    for (index, month) in overview.months().iter().enumerate() {
        for (category, value) in month.iter() {
            assert!(
                value.is_zero(),
                "Expected empty overview, month {} category {} is {}",
                index,
                category,
                value
            );
        }
    }
}
