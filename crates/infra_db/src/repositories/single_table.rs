//! Single-table repository
//!
//! Records are stored as `(pk, sk, attributes)` rows in `finance_app`. The
//! attribute map is serialized whole into the JSONB column, key attributes
//! included. Conditional writes report whether they were applied rather than
//! failing, so that callers decide how to surface a violated condition.

use sqlx::types::Json;
use sqlx::PgPool;
use tracing::debug;

use domain_finance::{IndexQuery, Item, PrimaryKey, TableIndex, WriteCondition};

use crate::error::DatabaseError;

const TABLE: &str = "finance_app";

/// SQL for writing a whole record under a condition
pub fn put_sql(condition: WriteCondition) -> String {
    match condition {
        WriteCondition::None => format!(
            "INSERT INTO {TABLE} (pk, sk, attributes) VALUES ($1, $2, $3) \
             ON CONFLICT (pk, sk) DO UPDATE SET attributes = EXCLUDED.attributes"
        ),
        WriteCondition::ItemNotExists => format!(
            "INSERT INTO {TABLE} (pk, sk, attributes) VALUES ($1, $2, $3) \
             ON CONFLICT (pk, sk) DO NOTHING"
        ),
        WriteCondition::ItemExists => {
            format!("UPDATE {TABLE} SET attributes = $3 WHERE pk = $1 AND sk = $2")
        }
    }
}

/// SQL for merging attributes into a record under a condition
///
/// `$3` must carry the key attributes so that an insert creates a complete
/// record.
pub fn merge_sql(condition: WriteCondition) -> String {
    match condition {
        WriteCondition::None => format!(
            "INSERT INTO {TABLE} (pk, sk, attributes) VALUES ($1, $2, $3) \
             ON CONFLICT (pk, sk) DO UPDATE SET attributes = {TABLE}.attributes || EXCLUDED.attributes"
        ),
        WriteCondition::ItemNotExists => put_sql(WriteCondition::ItemNotExists),
        WriteCondition::ItemExists => format!(
            "UPDATE {TABLE} SET attributes = attributes || $3 WHERE pk = $1 AND sk = $2"
        ),
    }
}

/// SQL for an equality query on one of the partial indexes
///
/// The expressions match the index definitions in the migrations so that the
/// planner can use them. Ties are broken by primary key ascending.
pub fn index_query_sql(index: TableIndex, scan_forward: bool) -> String {
    let partition = index.partition_attribute();
    let mut sql = format!(
        "SELECT attributes FROM {TABLE} WHERE attributes->'{partition}'->>'S' = $1"
    );

    match index.sort_attribute() {
        Some(sort) => {
            let direction = if scan_forward { "ASC" } else { "DESC" };
            sql.push_str(&format!(
                " AND (attributes->'{sort}'->>'N') IS NOT NULL \
                 ORDER BY (attributes->'{sort}'->>'N')::numeric {direction}, pk ASC, sk ASC"
            ));
        }
        None => sql.push_str(" ORDER BY pk ASC, sk ASC"),
    }
    sql
}

/// Data access for the `finance_app` table
#[derive(Debug, Clone)]
pub struct SingleTableRepository {
    pool: PgPool,
}

impl SingleTableRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Writes a whole record
    ///
    /// # Arguments
    ///
    /// * `key` - primary key, bound to the `pk`/`sk` columns
    /// * `item` - every attribute of the record, keys included
    /// * `condition` - precondition on the existing row
    ///
    /// # Returns
    ///
    /// `false` if the condition rejected the write, `true` otherwise
    pub async fn put(
        &self,
        key: &PrimaryKey,
        item: &Item,
        condition: WriteCondition,
    ) -> Result<bool, DatabaseError> {
        let result = sqlx::query(&put_sql(condition))
            .bind(&key.pk)
            .bind(&key.sk)
            .bind(Json(item))
            .execute(&self.pool)
            .await?;
        debug!(%key, ?condition, rows = result.rows_affected(), "put");
        Ok(result.rows_affected() > 0)
    }

    pub async fn get(&self, key: &PrimaryKey) -> Result<Option<Item>, DatabaseError> {
        let row = sqlx::query_scalar::<_, Json<Item>>(&format!(
            "SELECT attributes FROM {TABLE} WHERE pk = $1 AND sk = $2"
        ))
        .bind(&key.pk)
        .bind(&key.sk)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|Json(item)| item))
    }

    /// Merges attributes into a record, leaving the others untouched
    ///
    /// # Returns
    ///
    /// `false` if the condition rejected the write, `true` otherwise
    pub async fn merge(
        &self,
        key: &PrimaryKey,
        attributes: &Item,
        condition: WriteCondition,
    ) -> Result<bool, DatabaseError> {
        let result = sqlx::query(&merge_sql(condition))
            .bind(&key.pk)
            .bind(&key.sk)
            .bind(Json(attributes))
            .execute(&self.pool)
            .await?;
        debug!(%key, ?condition, rows = result.rows_affected(), "merge");
        Ok(result.rows_affected() > 0)
    }

    /// Deletes a record, returning its last attributes
    pub async fn delete(&self, key: &PrimaryKey) -> Result<Option<Item>, DatabaseError> {
        let row = sqlx::query_scalar::<_, Json<Item>>(&format!(
            "DELETE FROM {TABLE} WHERE pk = $1 AND sk = $2 RETURNING attributes"
        ))
        .bind(&key.pk)
        .bind(&key.sk)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|Json(item)| item))
    }

    /// Equality query on a partial index, in index order
    pub async fn query(&self, query: &IndexQuery) -> Result<Vec<Item>, DatabaseError> {
        let rows = sqlx::query_scalar::<_, Json<Item>>(&index_query_sql(query.index, query.scan_forward))
            .bind(&query.partition_value)
            .fetch_all(&self.pool)
            .await?;
        debug!(index = %query.index, partition = %query.partition_value, count = rows.len(), "query");
        Ok(rows.into_iter().map(|Json(item)| item).collect())
    }

    /// Round-trips a trivial query
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
