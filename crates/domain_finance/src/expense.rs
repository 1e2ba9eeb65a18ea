//! Expense entity and its change requests

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::temporal::truncate_to_seconds;
use core_kernel::{ExpenseId, YearMonth};

use crate::error::FinanceError;

/// Spending category of an expense
///
/// The serialized form is the category code used by the stored records and
/// the overview keys. English names are accepted as aliases on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "ESSEN", alias = "FOOD")]
    Food,
    #[serde(rename = "FREIZEIT", alias = "LEISURE")]
    Leisure,
    #[serde(rename = "GESUNDHEIT", alias = "HEALTH")]
    Health,
    #[serde(rename = "KLEIDUNG", alias = "CLOTHING")]
    Clothing,
    #[serde(rename = "TRANSPORT")]
    Transport,
    #[serde(rename = "WOHNEN", alias = "HOUSING")]
    Housing,
    #[serde(rename = "SONSTIGES", alias = "OTHER")]
    #[default]
    Other,
}

impl Category {
    /// Every category, in overview column order
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Leisure,
        Category::Health,
        Category::Clothing,
        Category::Transport,
        Category::Housing,
        Category::Other,
    ];

    /// Stored/wire code
    pub fn code(&self) -> &'static str {
        match self {
            Category::Food => "ESSEN",
            Category::Leisure => "FREIZEIT",
            Category::Health => "GESUNDHEIT",
            Category::Clothing => "KLEIDUNG",
            Category::Transport => "TRANSPORT",
            Category::Housing => "WOHNEN",
            Category::Other => "SONSTIGES",
        }
    }

    /// English name, accepted as an alias on input
    pub fn english_name(&self) -> &'static str {
        match self {
            Category::Food => "FOOD",
            Category::Leisure => "LEISURE",
            Category::Health => "HEALTH",
            Category::Clothing => "CLOTHING",
            Category::Transport => "TRANSPORT",
            Category::Housing => "HOUSING",
            Category::Other => "OTHER",
        }
    }

    /// Position in [`Category::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Category::Food => 0,
            Category::Leisure => 1,
            Category::Health => 2,
            Category::Clothing => 3,
            Category::Transport => 4,
            Category::Housing => 5,
            Category::Other => 6,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Category {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.code() == s || c.english_name() == s)
            .ok_or_else(|| FinanceError::validation("category", format!("unknown category '{}'", s)))
    }
}

/// A single recorded expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    pub id: ExpenseId,
    pub name: String,
    pub amount: Decimal,
    /// Always whole seconds; that is the precision the store keeps
    pub date: DateTime<Utc>,
    pub category: Category,
}

impl Expense {
    pub fn year_month(&self) -> YearMonth {
        YearMonth::of(&self.date)
    }
}

/// Request to record a new expense
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub name: String,
    pub amount: Decimal,
    /// Defaults to the creation time
    pub date: Option<DateTime<Utc>>,
    /// Defaults to [`Category::Other`]
    pub category: Option<Category>,
}

impl NewExpense {
    pub fn new(name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            name: name.into(),
            amount,
            date: None,
            category: None,
        }
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Validates the request and materialises the expense under a fresh id
    pub fn into_expense(self, id: ExpenseId, now: DateTime<Utc>) -> Result<Expense, FinanceError> {
        validate_name(&self.name)?;
        validate_amount(self.amount)?;

        Ok(Expense {
            id,
            name: self.name,
            amount: self.amount,
            date: truncate_to_seconds(self.date.unwrap_or(now)),
            category: self.category.unwrap_or_default(),
        })
    }
}

/// Sparse set of changes to an existing expense
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpensePatch {
    pub name: Option<String>,
    pub amount: Option<Decimal>,
    pub date: Option<DateTime<Utc>>,
    pub category: Option<Category>,
}

impl ExpensePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.amount.is_none() && self.date.is_none() && self.category.is_none()
    }

    pub fn validate(&self) -> Result<(), FinanceError> {
        if self.is_empty() {
            return Err(FinanceError::validation("body", "at least one field must be supplied"));
        }
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), FinanceError> {
    if name.is_empty() {
        return Err(FinanceError::validation("name", "must not be empty"));
    }
    Ok(())
}

fn validate_amount(amount: Decimal) -> Result<(), FinanceError> {
    if amount <= Decimal::ZERO {
        return Err(FinanceError::validation("amount", "must be greater than zero"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_category_parse_accepts_code_and_english() {
        assert_eq!("ESSEN".parse::<Category>().unwrap(), Category::Food);
        assert_eq!("FOOD".parse::<Category>().unwrap(), Category::Food);
        assert!("food".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serde_uses_code() {
        assert_eq!(serde_json::to_string(&Category::Housing).unwrap(), "\"WOHNEN\"");
        let parsed: Category = serde_json::from_str("\"LEISURE\"").unwrap();
        assert_eq!(parsed, Category::Leisure);
    }

    #[test]
    fn test_category_index_matches_all() {
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn test_new_expense_defaults() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let expense = NewExpense::new("Bus", dec!(3.2))
            .into_expense(ExpenseId::new(), now)
            .unwrap();
        assert_eq!(expense.category, Category::Other);
        assert_eq!(expense.date, now);
    }

    #[test]
    fn test_new_expense_rejects_non_positive_amount() {
        let now = Utc::now();
        let err = NewExpense::new("Refund", dec!(-1))
            .into_expense(ExpenseId::new(), now)
            .unwrap_err();
        assert!(err.is_validation());
        assert!(NewExpense::new("Zero", dec!(0)).into_expense(ExpenseId::new(), now).is_err());
    }

    #[test]
    fn test_empty_patch_is_invalid() {
        assert!(ExpensePatch::default().validate().unwrap_err().is_validation());
    }
}
