//! Query construction for the month and year access patterns

use std::fmt;

use core_kernel::{UserId, YearMonth};

use crate::error::FinanceError;
use crate::mapping::{user_year, user_year_month};
use crate::table::{IndexQuery, TableIndex};

/// Ordering of a month listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Amount ascending, most expensive last
    #[default]
    Expensive,
    /// Date descending
    Newest,
}

impl SortOrder {
    /// Anything other than `NEWEST`, including nothing at all, selects the default
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw {
            Some("NEWEST") => SortOrder::Newest,
            _ => SortOrder::Expensive,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Expensive => "EXPENSIVE",
            SortOrder::Newest => "NEWEST",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Listing of one month's expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExpenseQuery {
    /// Defaults to the current year
    pub year: Option<i32>,
    /// 1-12, defaults to the current month
    pub month: Option<u32>,
    pub sort: SortOrder,
}

impl ExpenseQuery {
    pub fn for_month(period: YearMonth) -> Self {
        Self {
            year: Some(period.year()),
            month: Some(period.month()),
            sort: SortOrder::default(),
        }
    }

    pub fn sorted(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Fills absent parts from `today`
    pub fn resolve_period(&self, today: YearMonth) -> Result<YearMonth, FinanceError> {
        let period = YearMonth::new(
            self.year.unwrap_or(today.year()),
            self.month.unwrap_or(today.month()),
        )?;
        Ok(period)
    }

    pub fn to_index_query(&self, user: &UserId, today: YearMonth) -> Result<IndexQuery, FinanceError> {
        Ok(month_query(user, self.resolve_period(today)?, self.sort))
    }
}

/// Index query listing a month of expenses in the requested order
pub fn month_query(user: &UserId, period: YearMonth, sort: SortOrder) -> IndexQuery {
    let (index, scan_forward) = match sort {
        SortOrder::Expensive => (TableIndex::MonthByAmount, true),
        SortOrder::Newest => (TableIndex::MonthByDate, false),
    };
    IndexQuery {
        index,
        partition_value: user_year_month(user, period),
        scan_forward,
    }
}

/// Index query returning every expense of a year
pub fn year_query(user: &UserId, year: i32) -> IndexQuery {
    IndexQuery {
        index: TableIndex::Year,
        partition_value: user_year(user, year),
        scan_forward: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserId {
        UserId::parse("bob").unwrap()
    }

    #[test]
    fn test_sort_parse_lenient() {
        assert_eq!(SortOrder::parse_lenient(Some("NEWEST")), SortOrder::Newest);
        assert_eq!(SortOrder::parse_lenient(Some("EXPENSIVE")), SortOrder::Expensive);
        assert_eq!(SortOrder::parse_lenient(Some("CHEAPEST")), SortOrder::Expensive);
        assert_eq!(SortOrder::parse_lenient(None), SortOrder::Expensive);
    }

    #[test]
    fn test_defaults_from_today() {
        let today = YearMonth::new(2025, 7).unwrap();
        let query = ExpenseQuery::default();
        assert_eq!(query.resolve_period(today).unwrap(), today);

        let only_month = ExpenseQuery { month: Some(2), ..Default::default() };
        assert_eq!(only_month.resolve_period(today).unwrap(), YearMonth::new(2025, 2).unwrap());
    }

    #[test]
    fn test_invalid_month_is_validation_error() {
        let query = ExpenseQuery { month: Some(13), ..Default::default() };
        let today = YearMonth::new(2025, 7).unwrap();
        assert!(query.resolve_period(today).unwrap_err().is_validation());
    }

    #[test]
    fn test_newest_scans_date_index_backwards() {
        let q = month_query(&user(), YearMonth::new(2024, 3).unwrap(), SortOrder::Newest);
        assert_eq!(q.index, TableIndex::MonthByDate);
        assert!(!q.scan_forward);
        assert_eq!(q.partition_value, "bob#2024#3");
    }

    #[test]
    fn test_default_scans_amount_index_forwards() {
        let q = month_query(&user(), YearMonth::new(2024, 11).unwrap(), SortOrder::Expensive);
        assert_eq!(q.index, TableIndex::MonthByAmount);
        assert!(q.scan_forward);
        assert_eq!(q.partition_value, "bob#2024#11");
    }

    #[test]
    fn test_year_query() {
        let q = year_query(&user(), 2024);
        assert_eq!(q.index, TableIndex::Year);
        assert_eq!(q.partition_value, "bob#2024");
    }
}
