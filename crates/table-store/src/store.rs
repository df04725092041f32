use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{Record, RecordId, Result, StoreError};

/// Core trait for table store implementations.
///
/// A table store keeps schemaless records in named tables, keyed by a
/// per-table integer id. It has no foreign-key awareness; referential
/// integrity belongs to the layer above. All implementations must be
/// thread-safe (`Send + Sync`).
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Fetches a record by key. Returns `None` when absent.
    async fn get(&self, table: &str, key: RecordId) -> Result<Option<Record>>;

    /// Inserts or overwrites a record unconditionally.
    async fn put(&self, table: &str, key: RecordId, record: Record) -> Result<()>;

    /// Merges only the patch's fields into an existing record and returns
    /// the updated record. Fails with `NotFound` when the key is absent.
    async fn update(&self, table: &str, key: RecordId, patch: Record) -> Result<Record>;

    /// Atomically adds each delta to the named numeric field, treating a
    /// missing field as 0, and returns the post-increment record.
    ///
    /// The read-modify-write happens inside the store, so concurrent
    /// increments to the same key never lose updates.
    async fn increment(&self, table: &str, key: RecordId, deltas: &[(&str, f64)])
    -> Result<Record>;

    /// Removes a record. No-op when the key is absent.
    async fn delete(&self, table: &str, key: RecordId) -> Result<()>;

    /// Allocates a fresh id for the table: strictly increasing from 1,
    /// never repeated, even under concurrent callers.
    async fn next_id(&self, table: &str) -> Result<RecordId>;

    /// Returns every record in the table, in unspecified order.
    async fn scan(&self, table: &str) -> Result<Vec<Record>>;
}

/// Extension trait providing convenience methods for table stores.
#[async_trait]
pub trait TableStoreExt: TableStore {
    /// Fetches a record, mapping absence to `NotFound`.
    async fn get_required(&self, table: &str, key: RecordId) -> Result<Record> {
        self.get(table, key)
            .await?
            .ok_or_else(|| StoreError::not_found(table, key))
    }

    /// Fetches and decodes a record into a typed value.
    async fn get_as<T: DeserializeOwned + Send>(
        &self,
        table: &str,
        key: RecordId,
    ) -> Result<Option<T>> {
        match self.get(table, key).await? {
            Some(record) => Ok(Some(record.decode()?)),
            None => Ok(None),
        }
    }

    /// Encodes a typed value and writes it under the given key.
    async fn put_as<T: Serialize + Sync>(
        &self,
        table: &str,
        key: RecordId,
        value: &T,
    ) -> Result<()> {
        self.put(table, key, Record::encode(value)?).await
    }

    /// Returns every record in the table decoded into a typed value.
    async fn scan_as<T: DeserializeOwned + Send>(&self, table: &str) -> Result<Vec<T>> {
        self.scan(table)
            .await?
            .iter()
            .map(Record::decode)
            .collect()
    }
}

// Blanket implementation for all TableStore implementations
impl<T: TableStore + ?Sized> TableStoreExt for T {}
