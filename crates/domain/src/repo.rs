//! Typed repository over the schemaless table store.

use common::RecordId;
use table_store::{Record, TableStore, TableStoreExt};

use crate::entities::{Entity, Package, PartialShipment, PartialShipmentItem};
use crate::error::{DomainError, Result};

/// Typed CRUD access for every entity kind, plus the foreign-key scans the
/// store itself cannot do.
///
/// Listings are full-table scans filtered in memory; callers sort as needed.
#[derive(Clone)]
pub struct Repository<S> {
    store: S,
}

impl<S: TableStore> Repository<S> {
    /// Creates a repository over the given table store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying table store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Allocates a fresh id, hands it to the builder, and persists the
    /// resulting entity.
    pub async fn create<E, F>(&self, build: F) -> Result<E>
    where
        E: Entity,
        F: FnOnce(RecordId) -> E + Send,
    {
        let id = self.store.next_id(E::TABLE).await?;
        let entity = build(id);
        self.store
            .put(E::TABLE, entity.id(), Record::encode(&entity)?)
            .await?;
        Ok(entity)
    }

    /// Fetches an entity by id. Returns `None` when absent.
    pub async fn get<E: Entity>(&self, id: RecordId) -> Result<Option<E>> {
        Ok(self.store.get_as::<E>(E::TABLE, id).await?)
    }

    /// Fetches an entity by id, mapping absence to `NotFound`.
    pub async fn get_required<E: Entity>(&self, id: RecordId) -> Result<E> {
        self.get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(E::TABLE, id))
    }

    /// Returns every entity in the table, in unspecified order.
    pub async fn list<E: Entity>(&self) -> Result<Vec<E>> {
        Ok(self.store.scan_as::<E>(E::TABLE).await?)
    }

    /// Merges the patch's set fields into an existing entity and returns the
    /// updated entity. Fails with `NotFound` when the id is absent.
    pub async fn update<E: Entity>(&self, id: RecordId, patch: &E::Patch) -> Result<E> {
        let record = self
            .store
            .update(E::TABLE, id, Record::encode(patch)?)
            .await?;
        Ok(record.decode()?)
    }

    /// Removes an entity. No-op when absent. Referential guards live in the
    /// domain operations, not here.
    pub async fn delete<E: Entity>(&self, id: RecordId) -> Result<()> {
        Ok(self.store.delete(E::TABLE, id).await?)
    }

    /// All partial shipments belonging to the given shipment.
    pub async fn partials_for_shipment(&self, shipment_id: RecordId) -> Result<Vec<PartialShipment>> {
        let mut partials = self.list::<PartialShipment>().await?;
        partials.retain(|partial| partial.shipment_id == shipment_id);
        Ok(partials)
    }

    /// All partial shipments belonging to the given customer.
    pub async fn partials_for_customer(&self, customer_id: RecordId) -> Result<Vec<PartialShipment>> {
        let mut partials = self.list::<PartialShipment>().await?;
        partials.retain(|partial| partial.customer_id == customer_id);
        Ok(partials)
    }

    /// All packages inside the given partial shipment.
    pub async fn packages_for_partial(&self, partial_id: RecordId) -> Result<Vec<Package>> {
        let mut packages = self.list::<Package>().await?;
        packages.retain(|package| package.partial_shipment_id == partial_id);
        Ok(packages)
    }

    /// All line items inside the given partial shipment.
    pub async fn items_for_partial(&self, partial_id: RecordId) -> Result<Vec<PartialShipmentItem>> {
        let mut items = self.list::<PartialShipmentItem>().await?;
        items.retain(|item| item.partial_shipment_id == partial_id);
        Ok(items)
    }
}
