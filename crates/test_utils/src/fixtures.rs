//! Pre-built Test Fixtures
//!
//! Ready-to-use users, dates and expenses. Values are fixed so that tests
//! can assert on exact keys and sums.

use chrono::{DateTime, TimeZone, Utc};
use core_kernel::{ExpenseId, UserId, YearMonth};
use domain_finance::{Category, FinanceService, InMemoryTable, NewExpense};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use uuid::Uuid;

/// Fixture for user identities
pub struct UserFixtures;

impl UserFixtures {
    /// The fixed identity used in offline mode
    pub fn offline_user() -> UserId {
        UserId::parse("testUser").unwrap()
    }

    pub fn alice() -> UserId {
        UserId::parse("alice").unwrap()
    }

    pub fn bob() -> UserId {
        UserId::parse("bob").unwrap()
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// 2024-03-15 09:30:00 UTC, epoch 1710495000
    pub fn march_15_2024() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap()
    }

    pub fn march_2024() -> YearMonth {
        YearMonth::new(2024, 3).unwrap()
    }

    pub fn april_2024() -> YearMonth {
        YearMonth::new(2024, 4).unwrap()
    }

    /// Midday on the given day of 2024
    pub fn day_2024(month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, month, day, 12, 0, 0).unwrap()
    }

    /// Last second of 2024, for year-boundary tests
    pub fn new_years_eve_2024() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap()
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// Deterministic id that is never created by the service
    pub fn unknown_expense_id() -> ExpenseId {
        ExpenseId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440404").unwrap())
    }
}

/// Fixture for expense requests
pub struct ExpenseFixtures;

impl ExpenseFixtures {
    /// Milk for 2.5 on 2024-03-15, category ESSEN
    pub fn milk() -> NewExpense {
        NewExpense::new("Milk", dec!(2.5))
            .with_date(TemporalFixtures::march_15_2024())
            .with_category(Category::Food)
    }

    pub fn rent() -> NewExpense {
        NewExpense::new("Rent", dec!(950))
            .with_date(TemporalFixtures::day_2024(3, 1))
            .with_category(Category::Housing)
    }

    pub fn train_ticket() -> NewExpense {
        NewExpense::new("Train ticket", dec!(39.90))
            .with_date(TemporalFixtures::day_2024(3, 20))
            .with_category(Category::Transport)
    }

    /// Three March 2024 expenses whose amount and date orders differ
    pub fn march_2024_set() -> Vec<NewExpense> {
        vec![Self::milk(), Self::rent(), Self::train_ticket()]
    }

    /// Sum of [`ExpenseFixtures::march_2024_set`]
    pub fn march_2024_total() -> Decimal {
        dec!(992.40)
    }
}

/// Fixture for a service over an empty in-memory table
pub struct ServiceFixtures;

impl ServiceFixtures {
    /// Returns the service and a handle to its table for inspection
    pub fn in_memory() -> (FinanceService, InMemoryTable) {
        let table = InMemoryTable::new();
        let service = FinanceService::new(Arc::new(table.clone()));
        (service, table)
    }
}
