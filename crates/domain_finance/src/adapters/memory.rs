//! In-memory table adapter
//!
//! Backs offline mode and the test suites. Index queries scan the whole map,
//! which is fine for the data volumes it is meant for.

use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use core_kernel::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError};

use crate::ports::TablePort;
use crate::table::{attr, AttributeValue, IndexQuery, Item, ItemUpdate, PrimaryKey, WriteCondition};

/// Table held in process memory
#[derive(Debug, Default, Clone)]
pub struct InMemoryTable {
    items: Arc<RwLock<BTreeMap<PrimaryKey, Item>>>,
}

impl InMemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

fn check_condition(
    key: &PrimaryKey,
    existing: Option<&Item>,
    condition: WriteCondition,
) -> Result<(), PortError> {
    match (condition, existing) {
        (WriteCondition::ItemExists, None) => Err(PortError::condition_failed(format!(
            "no item with key {}",
            key
        ))),
        (WriteCondition::ItemNotExists, Some(_)) => Err(PortError::condition_failed(format!(
            "item with key {} already exists",
            key
        ))),
        _ => Ok(()),
    }
}

fn sort_value(item: &Item, attribute: Option<&str>) -> Option<rust_decimal::Decimal> {
    attribute.and_then(|name| item.get(name)).and_then(AttributeValue::as_n)
}

impl DomainPort for InMemoryTable {}

#[async_trait]
impl HealthCheckable for InMemoryTable {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult {
            adapter_id: "in-memory-table".to_string(),
            status: AdapterHealth::Healthy,
            latency_ms: 0,
            message: None,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl TablePort for InMemoryTable {
    async fn put_item(&self, item: Item, condition: WriteCondition) -> Result<(), PortError> {
        let key = PrimaryKey::of_item(&item)
            .ok_or_else(|| PortError::validation_field("item must carry string keys", attr::PK))?;

        let mut items = self.items.write().await;
        check_condition(&key, items.get(&key), condition)?;
        debug!(%key, "put item");
        items.insert(key, item);
        Ok(())
    }

    async fn get_item(&self, key: &PrimaryKey) -> Result<Option<Item>, PortError> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn update_item(&self, update: ItemUpdate) -> Result<(), PortError> {
        if update.set.contains_key(attr::PK) || update.set.contains_key(attr::SK) {
            return Err(PortError::validation("key attributes cannot be updated"));
        }

        let mut items = self.items.write().await;
        check_condition(&update.key, items.get(&update.key), update.condition)?;

        let ItemUpdate { key, set, .. } = update;
        debug!(%key, attributes = set.len(), "update item");
        let item = items.entry(key.clone()).or_insert_with(|| {
            let mut fresh = Item::new();
            fresh.insert(attr::PK.to_string(), AttributeValue::S(key.pk.clone()));
            fresh.insert(attr::SK.to_string(), AttributeValue::S(key.sk.clone()));
            fresh
        });
        item.extend(set);
        Ok(())
    }

    async fn delete_item(&self, key: &PrimaryKey) -> Result<Option<Item>, PortError> {
        Ok(self.items.write().await.remove(key))
    }

    async fn query(&self, query: &IndexQuery) -> Result<Vec<Item>, PortError> {
        let partition = query.index.partition_attribute();
        let sort = query.index.sort_attribute();

        let items = self.items.read().await;
        let mut matches: Vec<(&PrimaryKey, &Item)> = items
            .iter()
            .filter(|(_, item)| {
                item.get(partition).and_then(AttributeValue::as_s) == Some(query.partition_value.as_str())
            })
            .filter(|(_, item)| sort.is_none() || sort_value(item, sort).is_some())
            .collect();

        matches.sort_by(|(ka, a), (kb, b)| {
            let by_value = sort_value(a, sort).cmp(&sort_value(b, sort));
            let by_value = if query.scan_forward { by_value } else { by_value.reverse() };
            match by_value {
                Ordering::Equal => ka.cmp(kb),
                other => other,
            }
        });

        debug!(index = %query.index, partition = %query.partition_value, count = matches.len(), "query");
        Ok(matches.into_iter().map(|(_, item)| item.clone()).collect())
    }
}
