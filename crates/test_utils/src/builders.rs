//! Test Data Builders
//!
//! Builders let tests specify only the fields they care about.

use chrono::{DateTime, Utc};
use domain_finance::{Category, ExpensePatch, NewExpense};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::TemporalFixtures;

/// Builder for expense creation requests
pub struct NewExpenseBuilder {
    name: String,
    amount: Decimal,
    date: Option<DateTime<Utc>>,
    category: Option<Category>,
}

impl Default for NewExpenseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NewExpenseBuilder {
    /// A 10.00 expense on 2024-03-15 in the food category
    pub fn new() -> Self {
        Self {
            name: "Groceries".to_string(),
            amount: dec!(10.00),
            date: Some(TemporalFixtures::march_15_2024()),
            category: Some(Category::Food),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    /// Leaves the date to the service default
    pub fn without_date(mut self) -> Self {
        self.date = None;
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Leaves the category to the service default
    pub fn without_category(mut self) -> Self {
        self.category = None;
        self
    }

    pub fn build(self) -> NewExpense {
        NewExpense {
            name: self.name,
            amount: self.amount,
            date: self.date,
            category: self.category,
        }
    }
}

/// Builder for partial updates; starts empty
#[derive(Default)]
pub struct ExpensePatchBuilder {
    patch: ExpensePatch,
}

impl ExpensePatchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.patch.name = Some(name.into());
        self
    }

    pub fn amount(mut self, amount: Decimal) -> Self {
        self.patch.amount = Some(amount);
        self
    }

    pub fn date(mut self, date: DateTime<Utc>) -> Self {
        self.patch.date = Some(date);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.patch.category = Some(category);
        self
    }

    pub fn build(self) -> ExpensePatch {
        self.patch
    }
}
