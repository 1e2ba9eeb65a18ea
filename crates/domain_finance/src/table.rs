//! Single-table store primitives
//!
//! A record is a flat map of named, typed attributes. Every record carries a
//! partition key (`PK`) and a sort key (`SK`). Secondary indexes are sparse:
//! a record appears in an index only if it carries that index's partition
//! attribute.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Attribute names of the table layout
pub mod attr {
    pub const PK: &str = "PK";
    pub const SK: &str = "SK";
    pub const EXPENSE_AMOUNT: &str = "EXPENSE_AMOUNT";
    pub const EXPENSE_DATE: &str = "EXPENSE_DATE";
    pub const EXPENSE_CATEGORY: &str = "EXPENSE_CATEGORY";
    pub const EXPENSE_NAME: &str = "EXPENSE_NAME";
    /// `<user>#<year>#<month>`
    pub const EXPENSE_USER_DATE: &str = "EXPENSE_USER_DATE";
    /// `<user>#<year>`
    pub const EXPENSE_USER_YEAR: &str = "EXPENSE_USER_YEAR";
    pub const BUDGET: &str = "BUDGET";
}

/// A typed attribute value
///
/// Serializes as `{"S": "..."}` or `{"N": "..."}`; numbers keep their exact
/// decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeValue {
    S(String),
    N(Decimal),
}

impl AttributeValue {
    pub fn as_s(&self) -> Option<&str> {
        match self {
            AttributeValue::S(s) => Some(s),
            AttributeValue::N(_) => None,
        }
    }

    pub fn as_n(&self) -> Option<Decimal> {
        match self {
            AttributeValue::N(n) => Some(*n),
            AttributeValue::S(_) => None,
        }
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::S(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::S(value.to_string())
    }
}

impl From<Decimal> for AttributeValue {
    fn from(value: Decimal) -> Self {
        AttributeValue::N(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::N(Decimal::from(value))
    }
}

/// A stored record
pub type Item = BTreeMap<String, AttributeValue>;

/// Primary key of a record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PrimaryKey {
    pub pk: String,
    pub sk: String,
}

impl PrimaryKey {
    pub fn new(pk: impl Into<String>, sk: impl Into<String>) -> Self {
        Self {
            pk: pk.into(),
            sk: sk.into(),
        }
    }

    /// Extracts the primary key from a record's `PK`/`SK` attributes
    pub fn of_item(item: &Item) -> Option<Self> {
        let pk = item.get(attr::PK)?.as_s()?;
        let sk = item.get(attr::SK)?.as_s()?;
        Some(Self::new(pk, sk))
    }
}

impl fmt::Display for PrimaryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.pk, self.sk)
    }
}

/// The table's secondary indexes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableIndex {
    /// Expenses of a month ordered by amount
    MonthByAmount,
    /// Expenses of a month ordered by date
    MonthByDate,
    /// Expenses of a year, unordered
    Year,
}

impl TableIndex {
    pub const ALL: [TableIndex; 3] = [TableIndex::MonthByAmount, TableIndex::MonthByDate, TableIndex::Year];

    pub fn name(&self) -> &'static str {
        match self {
            TableIndex::MonthByAmount => "EXPENSE_USER_DATE-EXPENSE_AMOUNT-index",
            TableIndex::MonthByDate => "EXPENSE_USER_DATE-EXPENSE_DATE-index",
            TableIndex::Year => "EXPENSE_USER_YEAR-index",
        }
    }

    /// String attribute the index is partitioned on
    pub fn partition_attribute(&self) -> &'static str {
        match self {
            TableIndex::MonthByAmount | TableIndex::MonthByDate => attr::EXPENSE_USER_DATE,
            TableIndex::Year => attr::EXPENSE_USER_YEAR,
        }
    }

    /// Numeric attribute the index is ordered by, if any
    pub fn sort_attribute(&self) -> Option<&'static str> {
        match self {
            TableIndex::MonthByAmount => Some(attr::EXPENSE_AMOUNT),
            TableIndex::MonthByDate => Some(attr::EXPENSE_DATE),
            TableIndex::Year => None,
        }
    }
}

impl fmt::Display for TableIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Equality query on a secondary index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexQuery {
    pub index: TableIndex,
    /// Value the index partition attribute must equal
    pub partition_value: String,
    /// Ascending on the sort attribute when true, descending otherwise
    pub scan_forward: bool,
}

/// Precondition on the target record of a write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteCondition {
    #[default]
    None,
    /// Fail unless a record with this key exists
    ItemExists,
    /// Fail if a record with this key already exists
    ItemNotExists,
}

/// Sets a group of attributes on one record atomically
///
/// Without a condition this behaves as an upsert, creating the record if it
/// does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemUpdate {
    pub key: PrimaryKey,
    pub set: Item,
    pub condition: WriteCondition,
}

impl ItemUpdate {
    pub fn new(key: PrimaryKey) -> Self {
        Self {
            key,
            set: Item::new(),
            condition: WriteCondition::None,
        }
    }

    pub fn set(mut self, name: &str, value: impl Into<AttributeValue>) -> Self {
        self.set.insert(name.to_string(), value.into());
        self
    }

    pub fn with_condition(mut self, condition: WriteCondition) -> Self {
        self.condition = condition;
        self
    }

    /// Names of the attributes this update writes
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.set.keys().map(String::as_str)
    }
}
