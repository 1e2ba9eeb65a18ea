//! Tests against a live PostgreSQL instance
//!
//! Each test starts its own container. Set `TEST_DATABASE_URL` to run against
//! an existing database instead; without either, the tests log and skip.

use std::sync::Arc;

use core_kernel::{ExpenseId, HealthCheckable, UserId};
use domain_finance::{Category, ExpenseQuery, FinanceService, SortOrder, TablePort};
use domain_finance::table::{attr, AttributeValue, IndexQuery, Item, ItemUpdate, PrimaryKey, TableIndex, WriteCondition};
use infra_db::PostgresTableAdapter;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use test_utils::{
    assert_amounts_ascending, assert_newest_first, assert_overview_cell, test_database_or_skip,
    ExpenseFixtures, ExpensePatchBuilder, IdFixtures, TemporalFixtures, TestDatabase,
};

/// Service and adapter over a migrated database; the database must outlive both
async fn service() -> Option<(TestDatabase, FinanceService, PostgresTableAdapter)> {
    let db = test_database_or_skip().await?;
    let adapter = PostgresTableAdapter::new(db.pool().clone());
    let service = FinanceService::new(Arc::new(adapter.clone()));
    Some((db, service, adapter))
}

/// A user no earlier run has written to
fn fresh_user() -> UserId {
    UserId::parse(format!("it-{}", ExpenseId::new())).unwrap()
}

#[tokio::test]
async fn test_expense_lifecycle() {
    let Some((_db, service, _)) = service().await else { return };
    let user = fresh_user();

    for request in ExpenseFixtures::march_2024_set() {
        service.create_expense(&user, request).await.unwrap();
    }

    let march = ExpenseQuery::for_month(TemporalFixtures::march_2024());
    let by_amount = service.list_expenses(&user, march).await.unwrap();
    assert_eq!(by_amount.len(), 3);
    assert_amounts_ascending(&by_amount);

    let newest = service.list_expenses(&user, march.sorted(SortOrder::Newest)).await.unwrap();
    assert_newest_first(&newest);

    let milk = by_amount.iter().find(|e| e.name == "Milk").unwrap().clone();
    service
        .update_expense(&user, milk.id, ExpensePatchBuilder::new().date(TemporalFixtures::day_2024(4, 2)).build())
        .await
        .unwrap();
    assert_eq!(service.list_expenses(&user, march).await.unwrap().len(), 2);

    let overview = service.yearly_overview(&user, Some(2024)).await.unwrap();
    assert_overview_cell(&overview, 3, Category::Food, dec!(2.5));
    assert_overview_cell(&overview, 2, Category::Housing, dec!(950));

    service.delete_expense(&user, milk.id).await.unwrap();
    assert!(service.delete_expense(&user, milk.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_missing_expense_update_is_not_found() {
    let Some((_db, service, _)) = service().await else { return };
    let err = service
        .update_expense(&fresh_user(), IdFixtures::unknown_expense_id(), ExpensePatchBuilder::new().name("x").build())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_budget_default_and_update() {
    let Some((_db, service, _)) = service().await else { return };
    let user = fresh_user();

    assert_eq!(service.get_budget(&user).await.unwrap().amount, dec!(1000));
    service.update_budget(&user, dec!(420)).await.unwrap();
    assert_eq!(service.get_budget(&user).await.unwrap().amount, dec!(420));
}

#[tokio::test]
async fn test_health_check() {
    let Some((_db, _, adapter)) = service().await else { return };
    assert!(adapter.health_check().await.is_healthy());
}

fn expense_item(pk: &str, sk: &str, month_key: &str, amount: Decimal, date: i64) -> Item {
    let mut item = Item::new();
    item.insert(attr::PK.into(), pk.into());
    item.insert(attr::SK.into(), sk.into());
    item.insert(attr::EXPENSE_USER_DATE.into(), month_key.into());
    item.insert(attr::EXPENSE_AMOUNT.into(), amount.into());
    item.insert(attr::EXPENSE_DATE.into(), date.into());
    item
}

#[tokio::test]
async fn test_conditional_writes() {
    let Some((_db, _, adapter)) = service().await else { return };
    let pk = format!("USER#{}", fresh_user());
    let record = expense_item(&pk, "EXPENSE#1", "m#2024#3", dec!(1), 1);
    let key = PrimaryKey::of_item(&record).unwrap();

    adapter.put_item(record.clone(), WriteCondition::ItemNotExists).await.unwrap();
    let again = adapter.put_item(record, WriteCondition::ItemNotExists).await;
    assert!(again.unwrap_err().is_condition_failed());

    let ghost = ItemUpdate::new(PrimaryKey::new(pk.clone(), "EXPENSE#404"))
        .set(attr::EXPENSE_NAME, "ghost")
        .with_condition(WriteCondition::ItemExists);
    assert!(adapter.update_item(ghost).await.unwrap_err().is_condition_failed());
    assert!(adapter.get_item(&PrimaryKey::new(pk, "EXPENSE#404")).await.unwrap().is_none());

    adapter
        .update_item(
            ItemUpdate::new(key.clone())
                .set(attr::EXPENSE_NAME, "renamed")
                .with_condition(WriteCondition::ItemExists),
        )
        .await
        .unwrap();
    let stored = adapter.get_item(&key).await.unwrap().unwrap();
    assert_eq!(stored[attr::EXPENSE_NAME], AttributeValue::S("renamed".into()));
    assert_eq!(stored[attr::EXPENSE_AMOUNT], AttributeValue::N(dec!(1)));
}

#[tokio::test]
async fn test_delete_returns_old_item() {
    let Some((_db, _, adapter)) = service().await else { return };
    let pk = format!("USER#{}", fresh_user());
    let record = expense_item(&pk, "EXPENSE#x", "m#2024#3", dec!(7.5), 1);
    let key = PrimaryKey::of_item(&record).unwrap();
    adapter.put_item(record.clone(), WriteCondition::None).await.unwrap();

    assert_eq!(adapter.delete_item(&key).await.unwrap(), Some(record));
    assert!(adapter.delete_item(&key).await.unwrap().is_none());
}

#[tokio::test]
async fn test_index_ordering_breaks_ties_by_key() {
    let Some((_db, _, adapter)) = service().await else { return };
    let pk = format!("USER#{}", fresh_user());
    let month = format!("{}#2024#3", pk);
    for (sk, amount, date) in [
        ("EXPENSE#c", dec!(10), 300),
        ("EXPENSE#a", dec!(2.5), 300),
        ("EXPENSE#b", dec!(10), 100),
    ] {
        adapter
            .put_item(expense_item(&pk, sk, &month, amount, date), WriteCondition::None)
            .await
            .unwrap();
    }

    let sks = |items: Vec<Item>| -> Vec<String> {
        items.iter().map(|i| i[attr::SK].as_s().unwrap().to_string()).collect()
    };

    let by_amount = adapter
        .query(&IndexQuery {
            index: TableIndex::MonthByAmount,
            partition_value: month.clone(),
            scan_forward: true,
        })
        .await
        .unwrap();
    assert_eq!(sks(by_amount), vec!["EXPENSE#a", "EXPENSE#b", "EXPENSE#c"]);

    let newest = adapter
        .query(&IndexQuery {
            index: TableIndex::MonthByDate,
            partition_value: month,
            scan_forward: false,
        })
        .await
        .unwrap();
    assert_eq!(sks(newest), vec!["EXPENSE#a", "EXPENSE#c", "EXPENSE#b"]);
}
