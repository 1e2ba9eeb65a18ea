//! Finance domain service
//!
//! `FinanceService` implements the seven user-facing operations on top of a
//! [`TablePort`]. It holds no state of its own beyond the shared table handle,
//! so one instance serves every request.

use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use core_kernel::{ExpenseId, HealthCheckResult, UserId, YearMonth};

use crate::budget::Budget;
use crate::error::FinanceError;
use crate::expense::{Expense, ExpensePatch, NewExpense};
use crate::mapping::{budget_key, budget_to_item, expense_key, expense_to_item, item_to_budget, item_to_expense};
use crate::overview::YearlyOverview;
use crate::ports::TablePort;
use crate::query::{year_query, ExpenseQuery};
use crate::table::{attr, ItemUpdate, WriteCondition};
use crate::update::build_expense_update;

/// Application service for expenses, budgets and the yearly overview
#[derive(Clone)]
pub struct FinanceService {
    table: Arc<dyn TablePort>,
}

impl FinanceService {
    /// Creates a service over a shared table handle
    pub fn new(table: Arc<dyn TablePort>) -> Self {
        Self { table }
    }

    /// Records a new expense under a freshly generated id
    ///
    /// # Errors
    ///
    /// `FinanceError::Validation` for an empty name or a non-positive amount.
    #[instrument(skip_all, fields(user = %user))]
    pub async fn create_expense(&self, user: &UserId, request: NewExpense) -> Result<Expense, FinanceError> {
        let expense = request.into_expense(ExpenseId::new(), Utc::now())?;

        self.table
            .put_item(expense_to_item(user, &expense), WriteCondition::ItemNotExists)
            .await?;

        info!(expense_id = %expense.id, period = %expense.year_month(), "Expense created");
        Ok(expense)
    }

    /// Hard-deletes an expense
    ///
    /// # Errors
    ///
    /// `FinanceError::ExpenseNotFound` if the user has no expense with this id.
    #[instrument(skip_all, fields(user = %user, expense_id = %id))]
    pub async fn delete_expense(&self, user: &UserId, id: ExpenseId) -> Result<(), FinanceError> {
        match self.table.delete_item(&expense_key(user, &id)).await? {
            Some(_) => {
                info!("Expense deleted");
                Ok(())
            }
            None => Err(FinanceError::ExpenseNotFound(id)),
        }
    }

    /// Point lookup of one expense
    #[instrument(skip_all, fields(user = %user, expense_id = %id))]
    pub async fn get_expense(&self, user: &UserId, id: ExpenseId) -> Result<Expense, FinanceError> {
        let item = self
            .table
            .get_item(&expense_key(user, &id))
            .await?
            .ok_or(FinanceError::ExpenseNotFound(id))?;
        item_to_expense(&item)
    }

    /// Lists one month of expenses in the requested order
    ///
    /// Missing year or month default to the current UTC calendar month.
    #[instrument(skip_all, fields(user = %user))]
    pub async fn list_expenses(&self, user: &UserId, query: ExpenseQuery) -> Result<Vec<Expense>, FinanceError> {
        let index_query = query.to_index_query(user, YearMonth::current())?;
        let items = self.table.query(&index_query).await?;
        debug!(index = %index_query.index, count = items.len(), "Expenses fetched");
        items.iter().map(item_to_expense).collect()
    }

    /// Applies a partial update to an existing expense
    ///
    /// # Errors
    ///
    /// `FinanceError::Validation` for an empty or invalid patch,
    /// `FinanceError::ExpenseNotFound` if the expense does not exist.
    #[instrument(skip_all, fields(user = %user, expense_id = %id))]
    pub async fn update_expense(&self, user: &UserId, id: ExpenseId, patch: ExpensePatch) -> Result<(), FinanceError> {
        let update = build_expense_update(user, &id, &patch)?;

        match self.table.update_item(update).await {
            Ok(()) => {
                info!(date_changed = patch.date.is_some(), "Expense updated");
                Ok(())
            }
            Err(e) if e.is_condition_failed() => Err(FinanceError::ExpenseNotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Returns the user's budget, creating the default on first access
    #[instrument(skip_all, fields(user = %user))]
    pub async fn get_budget(&self, user: &UserId) -> Result<Budget, FinanceError> {
        let key = budget_key(user);
        if let Some(item) = self.table.get_item(&key).await? {
            return item_to_budget(&item);
        }

        let budget = Budget::default();
        match self
            .table
            .put_item(budget_to_item(user, &budget), WriteCondition::ItemNotExists)
            .await
        {
            Ok(()) => {
                info!(amount = %budget.amount, "Default budget created");
                Ok(budget)
            }
            Err(e) if e.is_condition_failed() => {
                warn!("Budget created concurrently, re-reading");
                let item = self
                    .table
                    .get_item(&key)
                    .await?
                    .ok_or_else(|| FinanceError::corrupt(key.to_string(), "budget vanished after create"))?;
                item_to_budget(&item)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrites the user's budget
    #[instrument(skip_all, fields(user = %user))]
    pub async fn update_budget(&self, user: &UserId, amount: Decimal) -> Result<(), FinanceError> {
        let budget = Budget::new(amount)?;
        self.table
            .update_item(ItemUpdate::new(budget_key(user)).set(attr::BUDGET, budget.amount))
            .await?;
        info!(amount = %budget.amount, "Budget updated");
        Ok(())
    }

    /// Sums a year of expenses per month and category
    ///
    /// A missing year defaults to the current UTC year.
    #[instrument(skip_all, fields(user = %user))]
    pub async fn yearly_overview(&self, user: &UserId, year: Option<i32>) -> Result<YearlyOverview, FinanceError> {
        let year = year.unwrap_or_else(|| YearMonth::current().year());
        let items = self.table.query(&year_query(user, year)).await?;
        let expenses = items.iter().map(item_to_expense).collect::<Result<Vec<_>, _>>()?;
        debug!(year, count = expenses.len(), "Overview aggregated");
        YearlyOverview::from_expenses(year, &expenses)
    }

    /// Health of the underlying table
    pub async fn health(&self) -> HealthCheckResult {
        self.table.health_check().await
    }
}
