//! Yearly overview: expenses summed per month and category

use rust_decimal::Decimal;

use crate::error::FinanceError;
use crate::expense::{Category, Expense};

fn checked_sum(values: impl IntoIterator<Item = Decimal>) -> Result<Decimal, FinanceError> {
    values.into_iter().try_fold(Decimal::ZERO, |acc, value| {
        acc.checked_add(value).ok_or(FinanceError::Overflow("overview total"))
    })
}

/// Category sums of one month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonthTotals {
    totals: [Decimal; Category::ALL.len()],
}

impl MonthTotals {
    pub fn get(&self, category: Category) -> Decimal {
        self.totals[category.index()]
    }

    /// Adds to one category sum
    ///
    /// # Errors
    ///
    /// `FinanceError::Overflow` if the sum leaves the `Decimal` range. The
    /// cell is left unchanged.
    pub fn add(&mut self, category: Category, amount: Decimal) -> Result<(), FinanceError> {
        let cell = &mut self.totals[category.index()];
        *cell = cell
            .checked_add(amount)
            .ok_or(FinanceError::Overflow("category sum"))?;
        Ok(())
    }

    /// Sum over all categories
    pub fn total(&self) -> Result<Decimal, FinanceError> {
        checked_sum(self.totals.iter().copied())
    }

    /// Every category with its sum, in [`Category::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = (Category, Decimal)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

/// Dense 12 x 7 table of sums for one year
///
/// Months are addressed by zero-based index: 0 is January, 11 is December.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearlyOverview {
    year: i32,
    months: [MonthTotals; 12],
}

impl YearlyOverview {
    /// An overview with every cell at zero
    pub fn new(year: i32) -> Self {
        Self {
            year,
            months: [MonthTotals::default(); 12],
        }
    }

    /// Folds expenses into a fresh overview
    pub fn from_expenses<'a>(
        year: i32,
        expenses: impl IntoIterator<Item = &'a Expense>,
    ) -> Result<Self, FinanceError> {
        let mut overview = Self::new(year);
        for expense in expenses {
            overview.add(expense)?;
        }
        Ok(overview)
    }

    /// Adds one expense to the cell of its month and category
    pub fn add(&mut self, expense: &Expense) -> Result<(), FinanceError> {
        let month = expense.year_month().month_index();
        self.months[month].add(expense.category, expense.amount)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Totals of a zero-based month index
    pub fn month(&self, index: usize) -> Option<&MonthTotals> {
        self.months.get(index)
    }

    pub fn months(&self) -> &[MonthTotals; 12] {
        &self.months
    }

    /// Sum of the whole year
    pub fn total(&self) -> Result<Decimal, FinanceError> {
        let monthly = self
            .months
            .iter()
            .map(MonthTotals::total)
            .collect::<Result<Vec<_>, _>>()?;
        checked_sum(monthly)
    }
}
