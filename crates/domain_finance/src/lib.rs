//! Personal Finance Domain
//!
//! Expenses and budgets live in one wide key-value table. Composite string
//! attributes derived from each expense's date let a handful of secondary
//! indexes answer every access pattern:
//!
//! | Access pattern            | Lookup                                        |
//! |---------------------------|-----------------------------------------------|
//! | by id                     | primary key `USER#<user>` / `EXPENSE#<id>`    |
//! | by month, cheapest first  | `EXPENSE_USER_DATE-EXPENSE_AMOUNT-index`      |
//! | by month, newest first    | `EXPENSE_USER_DATE-EXPENSE_DATE-index` (desc) |
//! | by year (overview)        | `EXPENSE_USER_YEAR-index`                     |
//! | budget                    | primary key `USER#<user>` / `USER#<user>`     |
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use domain_finance::{FinanceService, InMemoryTable, NewExpense, Category};
//! use core_kernel::UserId;
//! use rust_decimal_macros::dec;
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! rt.block_on(async {
//!     let service = FinanceService::new(Arc::new(InMemoryTable::new()));
//!     let user = UserId::parse("alice").unwrap();
//!
//!     let expense = service
//!         .create_expense(&user, NewExpense::new("Milk", dec!(2.5)).with_category(Category::Food))
//!         .await
//!         .unwrap();
//!     assert_eq!(expense.name, "Milk");
//!
//!     let budget = service.get_budget(&user).await.unwrap();
//!     assert_eq!(budget.amount, dec!(1000));
//! });
//! ```

pub mod error;
pub mod expense;
pub mod budget;
pub mod table;
pub mod mapping;
pub mod query;
pub mod update;
pub mod overview;
pub mod ports;
pub mod adapters;
pub mod services;

pub use error::FinanceError;
pub use expense::{Category, Expense, NewExpense, ExpensePatch};
pub use budget::{Budget, DEFAULT_BUDGET};
pub use table::{AttributeValue, Item, PrimaryKey, TableIndex, IndexQuery, ItemUpdate, WriteCondition};
pub use query::{ExpenseQuery, SortOrder};
pub use overview::{YearlyOverview, MonthTotals};
pub use ports::TablePort;
pub use adapters::InMemoryTable;
pub use services::FinanceService;
