use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    Record, RecordId, Result, StoreError,
    store::TableStore,
};

#[derive(Default)]
struct Inner {
    tables: HashMap<String, BTreeMap<i64, Record>>,
    counters: HashMap<String, i64>,
}

/// In-memory table store implementation.
///
/// Backs the test suite and single-process deployments. Every mutation runs
/// inside one write-lock critical section, which makes increments and id
/// allocation atomic with respect to concurrent callers, the same guarantee
/// the PostgreSQL implementation gets from single-statement updates.
#[derive(Clone, Default)]
pub struct MemoryTableStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryTableStore {
    /// Creates a new empty in-memory table store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of records in the named table.
    pub async fn record_count(&self, table: &str) -> usize {
        self.inner
            .read()
            .await
            .tables
            .get(table)
            .map_or(0, BTreeMap::len)
    }

    /// Clears all tables and counters.
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.tables.clear();
        inner.counters.clear();
    }
}

#[async_trait]
impl TableStore for MemoryTableStore {
    async fn get(&self, table: &str, key: RecordId) -> Result<Option<Record>> {
        let inner = self.inner.read().await;
        Ok(inner
            .tables
            .get(table)
            .and_then(|records| records.get(&key.as_i64()))
            .cloned())
    }

    async fn put(&self, table: &str, key: RecordId, record: Record) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner
            .tables
            .entry(table.to_string())
            .or_default()
            .insert(key.as_i64(), record);
        Ok(())
    }

    async fn update(&self, table: &str, key: RecordId, patch: Record) -> Result<Record> {
        let mut inner = self.inner.write().await;
        let record = inner
            .tables
            .get_mut(table)
            .and_then(|records| records.get_mut(&key.as_i64()))
            .ok_or_else(|| StoreError::not_found(table, key))?;
        record.merge(patch);
        Ok(record.clone())
    }

    async fn increment(
        &self,
        table: &str,
        key: RecordId,
        deltas: &[(&str, f64)],
    ) -> Result<Record> {
        let mut inner = self.inner.write().await;
        let record = inner
            .tables
            .get_mut(table)
            .and_then(|records| records.get_mut(&key.as_i64()))
            .ok_or_else(|| StoreError::not_found(table, key))?;
        for (field, delta) in deltas {
            record.add_to_field(field, *delta);
        }
        Ok(record.clone())
    }

    async fn delete(&self, table: &str, key: RecordId) -> Result<()> {
        let mut inner = self.inner.write().await;
        if let Some(records) = inner.tables.get_mut(table) {
            records.remove(&key.as_i64());
        }
        Ok(())
    }

    async fn next_id(&self, table: &str) -> Result<RecordId> {
        let mut inner = self.inner.write().await;
        let counter = inner.counters.entry(table.to_string()).or_insert(0);
        *counter += 1;
        Ok(RecordId::new(*counter))
    }

    async fn scan(&self, table: &str) -> Result<Vec<Record>> {
        let inner = self.inner.read().await;
        Ok(inner
            .tables
            .get(table)
            .map(|records| records.values().cloned().collect())
            .unwrap_or_default())
    }
}
