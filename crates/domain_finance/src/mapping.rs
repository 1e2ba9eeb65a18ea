//! Key construction and record (de)serialization
//!
//! The derived index attributes are always produced together with
//! `EXPENSE_DATE` by [`date_attributes`], both when writing a full record and
//! when patching one. Month numbers in the derived keys are 1-indexed and not
//! zero-padded; queries build the same strings through [`user_year_month`].

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use core_kernel::temporal::{from_epoch_seconds, to_epoch_seconds};
use core_kernel::{ExpenseId, UserId, YearMonth};

use crate::budget::Budget;
use crate::error::FinanceError;
use crate::expense::{Category, Expense};
use crate::table::{attr, AttributeValue, Item, PrimaryKey};

const USER_PREFIX: &str = "USER#";
const EXPENSE_PREFIX: &str = "EXPENSE#";

/// `USER#<user>`
pub fn user_partition(user: &UserId) -> String {
    format!("{}{}", USER_PREFIX, user)
}

/// `EXPENSE#<id>`
pub fn expense_sort_key(id: &ExpenseId) -> String {
    format!("{}{}", EXPENSE_PREFIX, id)
}

pub fn expense_key(user: &UserId, id: &ExpenseId) -> PrimaryKey {
    PrimaryKey::new(user_partition(user), expense_sort_key(id))
}

/// The budget is a singleton addressed by the user on both key halves
pub fn budget_key(user: &UserId) -> PrimaryKey {
    PrimaryKey::new(user_partition(user), user_partition(user))
}

/// `<user>#<year>#<month>`
pub fn user_year_month(user: &UserId, period: YearMonth) -> String {
    format!("{}#{}#{}", user, period.year(), period.month())
}

/// `<user>#<year>`
pub fn user_year(user: &UserId, year: i32) -> String {
    format!("{}#{}", user, year)
}

/// `EXPENSE_DATE` plus the two index attributes derived from it
pub fn date_attributes(user: &UserId, date: &DateTime<Utc>) -> [(&'static str, AttributeValue); 3] {
    let period = YearMonth::of(date);
    [
        (attr::EXPENSE_DATE, AttributeValue::from(to_epoch_seconds(date))),
        (attr::EXPENSE_USER_DATE, AttributeValue::S(user_year_month(user, period))),
        (attr::EXPENSE_USER_YEAR, AttributeValue::S(user_year(user, period.year()))),
    ]
}

/// Full record for an expense
pub fn expense_to_item(user: &UserId, expense: &Expense) -> Item {
    let key = expense_key(user, &expense.id);
    let mut item = Item::new();
    item.insert(attr::PK.to_string(), AttributeValue::S(key.pk));
    item.insert(attr::SK.to_string(), AttributeValue::S(key.sk));
    item.insert(attr::EXPENSE_AMOUNT.to_string(), AttributeValue::N(expense.amount));
    item.insert(
        attr::EXPENSE_CATEGORY.to_string(),
        AttributeValue::S(expense.category.code().to_string()),
    );
    item.insert(attr::EXPENSE_NAME.to_string(), AttributeValue::S(expense.name.clone()));
    for (name, value) in date_attributes(user, &expense.date) {
        item.insert(name.to_string(), value);
    }
    item
}

/// Rebuilds an expense from its record
pub fn item_to_expense(item: &Item) -> Result<Expense, FinanceError> {
    let reader = ItemReader::new(item);

    let sk = reader.string(attr::SK)?;
    let id = sk
        .strip_prefix(EXPENSE_PREFIX)
        .ok_or_else(|| reader.corrupt(format!("sort key '{}' is not an expense key", sk)))?
        .parse::<ExpenseId>()
        .map_err(|e| reader.corrupt(format!("invalid expense id: {}", e)))?;

    let seconds = reader
        .number(attr::EXPENSE_DATE)?
        .floor()
        .to_i64()
        .ok_or_else(|| reader.corrupt("EXPENSE_DATE does not fit epoch seconds"))?;
    let date = from_epoch_seconds(seconds).map_err(|e| reader.corrupt(e.to_string()))?;

    let category = reader
        .string(attr::EXPENSE_CATEGORY)?
        .parse::<Category>()
        .map_err(|e| reader.corrupt(e.to_string()))?;

    Ok(Expense {
        id,
        name: reader.string(attr::EXPENSE_NAME)?.to_string(),
        amount: reader.number(attr::EXPENSE_AMOUNT)?,
        date,
        category,
    })
}

/// Full record for a budget
pub fn budget_to_item(user: &UserId, budget: &Budget) -> Item {
    let key = budget_key(user);
    let mut item = Item::new();
    item.insert(attr::PK.to_string(), AttributeValue::S(key.pk));
    item.insert(attr::SK.to_string(), AttributeValue::S(key.sk));
    item.insert(attr::BUDGET.to_string(), AttributeValue::N(budget.amount));
    item
}

/// Reads a budget record; a record without an amount holds the default
pub fn item_to_budget(item: &Item) -> Result<Budget, FinanceError> {
    match item.get(attr::BUDGET) {
        None => Ok(Budget::default()),
        Some(value) => value
            .as_n()
            .map(|amount| Budget { amount })
            .ok_or_else(|| ItemReader::new(item).corrupt("BUDGET is not a number")),
    }
}

struct ItemReader<'a> {
    item: &'a Item,
}

impl<'a> ItemReader<'a> {
    fn new(item: &'a Item) -> Self {
        Self { item }
    }

    fn key(&self) -> String {
        PrimaryKey::of_item(self.item)
            .map(|k| k.to_string())
            .unwrap_or_else(|| "<no key>".to_string())
    }

    fn corrupt(&self, reason: impl Into<String>) -> FinanceError {
        FinanceError::corrupt(self.key(), reason)
    }

    fn string(&self, name: &str) -> Result<&'a str, FinanceError> {
        match self.item.get(name) {
            Some(AttributeValue::S(s)) => Ok(s),
            Some(AttributeValue::N(_)) => Err(self.corrupt(format!("{} is not a string", name))),
            None => Err(self.corrupt(format!("missing {}", name))),
        }
    }

    fn number(&self, name: &str) -> Result<Decimal, FinanceError> {
        match self.item.get(name) {
            Some(AttributeValue::N(n)) => Ok(*n),
            Some(AttributeValue::S(_)) => Err(self.corrupt(format!("{} is not a number", name))),
            None => Err(self.corrupt(format!("missing {}", name))),
        }
    }
}
