//! Multi-step domain operations.
//!
//! Everything here validates its preconditions before the first write and
//! fails atomically on the first violation: no partial side effect precedes
//! an error return. Cross-record sequences (transfer, cascading deletes) are
//! not wrapped in a store transaction. Each step is an independent atomic
//! single-record write; see the individual operations for the recovery
//! story.

use std::sync::Arc;

use chrono::Utc;
use common::RecordId;
use serde::Deserialize;
use serde_json::json;
use table_store::{Record, TableStore};

use crate::context::{IdentityResolver, ImageStore};
use crate::entities::{
    Customer, CustomerPatch, Entity, Note, NotePatch, Package, PartialShipment,
    PartialShipmentItem, PartialShipmentPatch, PaymentStatus, Shipment, ShipmentPatch, User,
    customer::FIELD_BALANCE,
    partial_shipment::FIELD_SHIPMENT_ID,
    shipment::{FIELD_DATE_CLOSED, FIELD_IS_OPEN, FIELD_TOTAL_VOLUME, FIELD_TOTAL_WEIGHT},
};
use crate::error::{DomainError, Result};
use crate::repo::Repository;

/// Content and images for a note to create or replace.
///
/// An input with neither content nor any image is "empty": creation paths
/// store no note at all for it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteInput {
    pub content: Option<String>,
    pub images: Option<Vec<String>>,
}

impl NoteInput {
    /// True when there is nothing to store.
    pub fn is_empty(&self) -> bool {
        self.content.as_deref().map_or(true, str::is_empty)
            && self.images.as_deref().map_or(true, <[String]>::is_empty)
    }
}

/// The entity a note hangs off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteOwner {
    Customer(RecordId),
    Shipment(RecordId),
    PartialShipment(RecordId),
}

/// Input for creating a customer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub origin: Option<String>,
    pub note: Option<NoteInput>,
}

/// Input for creating a shipment batch.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShipment {
    pub destination: String,
    pub driver_name: Option<String>,
    pub driver_vehicle: Option<String>,
    pub note: Option<NoteInput>,
}

/// Input for creating a partial shipment under an open batch.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPartialShipment {
    pub shipment_id: RecordId,
    pub customer_id: RecordId,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub discount_amount: f64,
    #[serde(default)]
    pub extra_cost_amount: f64,
    #[serde(default)]
    pub amount_paid: f64,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    pub receiver_name: Option<String>,
    pub receiver_phone: Option<String>,
    pub note: Option<NoteInput>,
}

/// Input for adding a package to a partial shipment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPackage {
    pub partial_shipment_id: RecordId,
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub weight: f64,
    pub units: u32,
}

/// Input for adding a line item to a partial shipment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub partial_shipment_id: RecordId,
    pub description: String,
    pub quantity: u32,
}

/// Input for creating a user.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

/// State-changing operations that must preserve referential and numeric
/// invariants.
///
/// Holds the typed repository and the host-supplied collaborators: the
/// identity resolver for audit stamping and the image store for note
/// attachments.
#[derive(Clone)]
pub struct Operations<S> {
    repo: Repository<S>,
    identity: Arc<dyn IdentityResolver>,
    images: Arc<dyn ImageStore>,
}

impl<S: TableStore> Operations<S> {
    /// Creates the operations service over a store and its collaborators.
    pub fn new(store: S, identity: Arc<dyn IdentityResolver>, images: Arc<dyn ImageStore>) -> Self {
        Self {
            repo: Repository::new(store),
            identity,
            images,
        }
    }

    /// Returns the typed repository for plain reads.
    pub fn repo(&self) -> &Repository<S> {
        &self.repo
    }

    async fn actor(&self) -> Option<RecordId> {
        self.identity.current_user().await
    }

    /// Creates the note when the input is non-empty, returning its id.
    async fn create_note_if_any(
        &self,
        note: Option<NoteInput>,
        actor: Option<RecordId>,
    ) -> Result<Option<RecordId>> {
        match note {
            Some(input) if !input.is_empty() => {
                let note = self
                    .repo
                    .create(|id| Note {
                        id,
                        content: input.content.filter(|content| !content.is_empty()),
                        images: input.images.unwrap_or_default(),
                        user_id: actor,
                    })
                    .await?;
                Ok(Some(note.id))
            }
            _ => Ok(None),
        }
    }

    // -- Users --

    #[tracing::instrument(skip(self, input), fields(username = %input.username))]
    pub async fn create_user(&self, input: NewUser) -> Result<User> {
        self.repo
            .create(|id| User {
                id,
                username: input.username,
                password_hash: input.password_hash,
            })
            .await
    }

    // -- Customers --

    /// Creates a customer, together with its note when one is supplied and
    /// non-empty.
    #[tracing::instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_customer(&self, input: NewCustomer) -> Result<Customer> {
        let actor = self.actor().await;
        let note_id = self.create_note_if_any(input.note, actor).await?;

        let customer = self
            .repo
            .create(|id| Customer {
                id,
                name: input.name,
                phone: input.phone,
                address: input.address,
                origin: input.origin,
                balance: 0.0,
                note_id,
                created_by_user_id: actor,
                updated_by_user_id: None,
            })
            .await?;

        metrics::counter!("customers_created_total").increment(1);
        Ok(customer)
    }

    /// Applies a patch to a customer, stamping the updating user.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_customer(&self, id: RecordId, mut patch: CustomerPatch) -> Result<Customer> {
        patch.updated_by_user_id = self.actor().await;
        self.repo.update::<Customer>(id, &patch).await
    }

    /// Atomically adds a non-zero delta to the customer's balance. A zero
    /// delta performs no write.
    #[tracing::instrument(skip(self))]
    pub async fn increment_balance(&self, customer_id: RecordId, delta: f64) -> Result<Customer> {
        let customer: Customer = self.repo.get_required(customer_id).await?;
        if delta == 0.0 {
            return Ok(customer);
        }

        let record = self
            .repo
            .store()
            .increment(Customer::TABLE, customer_id, &[(FIELD_BALANCE, delta)])
            .await?;

        metrics::counter!("balance_increments_total").increment(1);
        Ok(record.decode()?)
    }

    /// Deletes a customer and its attached note. Fails with `Conflict`
    /// while any partial shipment still references the customer.
    #[tracing::instrument(skip(self))]
    pub async fn delete_customer(&self, id: RecordId) -> Result<()> {
        let customer: Customer = self.repo.get_required(id).await?;

        let referencing = self.repo.partials_for_customer(id).await?;
        if !referencing.is_empty() {
            return Err(DomainError::Conflict(format!(
                "customer {id} is referenced by {} partial shipment(s)",
                referencing.len()
            )));
        }

        if let Some(note_id) = customer.note_id {
            self.repo.delete::<Note>(note_id).await?;
        }
        self.repo.delete::<Customer>(id).await?;
        Ok(())
    }

    // -- Shipments --

    /// Creates an open shipment with zeroed totals, together with its note
    /// when one is supplied and non-empty.
    #[tracing::instrument(skip(self, input), fields(destination = %input.destination))]
    pub async fn create_shipment(&self, input: NewShipment) -> Result<Shipment> {
        let actor = self.actor().await;
        let note_id = self.create_note_if_any(input.note, actor).await?;

        let shipment = self
            .repo
            .create(|id| Shipment {
                id,
                destination: input.destination,
                date_created: Utc::now(),
                date_closed: None,
                is_open: true,
                total_weight: 0.0,
                total_volume: 0.0,
                driver_name: input.driver_name,
                driver_vehicle: input.driver_vehicle,
                note_id,
                created_by_user_id: actor,
                updated_by_user_id: None,
            })
            .await?;

        metrics::counter!("shipments_created_total").increment(1);
        Ok(shipment)
    }

    /// Applies a patch to a shipment, stamping the updating user.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_shipment(&self, id: RecordId, mut patch: ShipmentPatch) -> Result<Shipment> {
        patch.updated_by_user_id = self.actor().await;
        self.repo.update::<Shipment>(id, &patch).await
    }

    /// Closes an open shipment, stamping `dateClosed`.
    #[tracing::instrument(skip(self))]
    pub async fn close_shipment(&self, id: RecordId) -> Result<Shipment> {
        let shipment: Shipment = self.repo.get_required(id).await?;
        if !shipment.is_open {
            return Err(DomainError::Conflict(format!(
                "shipment {id} is already closed"
            )));
        }

        let mut patch = Record::new();
        patch.insert(FIELD_IS_OPEN, json!(false));
        patch.insert(FIELD_DATE_CLOSED, json!(Utc::now()));
        if let Some(actor) = self.actor().await {
            patch.insert("updatedByUserId", json!(actor));
        }

        let record = self.repo.store().update(Shipment::TABLE, id, patch).await?;
        Ok(record.decode()?)
    }

    /// Reopens a closed shipment, clearing `dateClosed`.
    #[tracing::instrument(skip(self))]
    pub async fn reopen_shipment(&self, id: RecordId) -> Result<Shipment> {
        let shipment: Shipment = self.repo.get_required(id).await?;
        if shipment.is_open {
            return Err(DomainError::Conflict(format!("shipment {id} is open")));
        }

        let mut patch = Record::new();
        patch.insert(FIELD_IS_OPEN, json!(true));
        patch.insert(FIELD_DATE_CLOSED, serde_json::Value::Null);
        if let Some(actor) = self.actor().await {
            patch.insert("updatedByUserId", json!(actor));
        }

        let record = self.repo.store().update(Shipment::TABLE, id, patch).await?;
        Ok(record.decode()?)
    }

    /// Deletes a shipment and its attached note. Fails with `Conflict`
    /// while any partial shipment still references the shipment.
    #[tracing::instrument(skip(self))]
    pub async fn delete_shipment(&self, id: RecordId) -> Result<()> {
        let shipment: Shipment = self.repo.get_required(id).await?;

        let referencing = self.repo.partials_for_shipment(id).await?;
        if !referencing.is_empty() {
            return Err(DomainError::Conflict(format!(
                "shipment {id} is referenced by {} partial shipment(s)",
                referencing.len()
            )));
        }

        if let Some(note_id) = shipment.note_id {
            self.repo.delete::<Note>(note_id).await?;
        }
        self.repo.delete::<Shipment>(id).await?;
        Ok(())
    }

    // -- Partial shipments --

    /// Creates a partial shipment under an open batch for an existing
    /// customer.
    #[tracing::instrument(skip(self, input), fields(shipment = %input.shipment_id, customer = %input.customer_id))]
    pub async fn create_partial_shipment(
        &self,
        input: NewPartialShipment,
    ) -> Result<PartialShipment> {
        let shipment: Shipment = self.repo.get_required(input.shipment_id).await?;
        if !shipment.is_open {
            return Err(DomainError::Conflict(format!(
                "shipment {} is closed",
                shipment.id
            )));
        }
        self.repo.get_required::<Customer>(input.customer_id).await?;

        let actor = self.actor().await;
        let note_id = self.create_note_if_any(input.note, actor).await?;

        let partial = self
            .repo
            .create(|id| PartialShipment {
                id,
                shipment_id: input.shipment_id,
                customer_id: input.customer_id,
                cost: input.cost,
                discount_amount: input.discount_amount,
                extra_cost_amount: input.extra_cost_amount,
                amount_paid: input.amount_paid,
                payment_status: input.payment_status,
                note_id,
                receiver_name: input.receiver_name,
                receiver_phone: input.receiver_phone,
                created_by_user_id: actor,
                updated_by_user_id: None,
            })
            .await?;

        metrics::counter!("partial_shipments_created_total").increment(1);
        Ok(partial)
    }

    /// Applies a patch to a partial shipment, stamping the updating user.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_partial_shipment(
        &self,
        id: RecordId,
        mut patch: PartialShipmentPatch,
    ) -> Result<PartialShipment> {
        patch.updated_by_user_id = self.actor().await;
        self.repo.update::<PartialShipment>(id, &patch).await
    }

    /// Deletes a partial shipment with its packages, items and note, and
    /// walks the owning shipment's totals back down by the partial's
    /// current package contributions.
    #[tracing::instrument(skip(self))]
    pub async fn delete_partial_shipment(&self, id: RecordId) -> Result<()> {
        let partial: PartialShipment = self.repo.get_required(id).await?;

        let packages = self.repo.packages_for_partial(id).await?;
        let volume: f64 = packages.iter().map(Package::volume_contribution).sum();
        let weight: f64 = packages.iter().map(Package::weight_contribution).sum();

        for package in &packages {
            self.repo.delete::<Package>(package.id).await?;
        }
        for item in self.repo.items_for_partial(id).await? {
            self.repo.delete::<PartialShipmentItem>(item.id).await?;
        }
        if let Some(note_id) = partial.note_id {
            self.repo.delete::<Note>(note_id).await?;
        }
        self.repo.delete::<PartialShipment>(id).await?;

        if volume != 0.0 || weight != 0.0 {
            self.repo
                .store()
                .increment(
                    Shipment::TABLE,
                    partial.shipment_id,
                    &[(FIELD_TOTAL_VOLUME, -volume), (FIELD_TOTAL_WEIGHT, -weight)],
                )
                .await?;
        }
        Ok(())
    }

    /// Moves a partial shipment from one open shipment to another, shifting
    /// the running totals by the amounts recomputed from its current
    /// packages.
    ///
    /// The reassignment and the two total adjustments are three independent
    /// atomic writes, not one transaction. A crash in between leaves the
    /// totals stale while the partial shipment already points at the
    /// target; the totals are a derived cache recomputable from the
    /// packages table, so that state is recoverable rather than corrupt.
    #[tracing::instrument(skip(self))]
    pub async fn transfer_partial_shipment(
        &self,
        partial_id: RecordId,
        source_id: RecordId,
        target_id: RecordId,
    ) -> Result<PartialShipment> {
        if source_id == target_id {
            return Err(DomainError::InvalidArgument(
                "source and target shipment are the same".to_string(),
            ));
        }

        let partial: PartialShipment = self.repo.get_required(partial_id).await?;
        if partial.shipment_id != source_id {
            return Err(DomainError::Conflict(format!(
                "partial shipment {partial_id} does not belong to shipment {source_id}"
            )));
        }

        let source: Shipment = self.repo.get_required(source_id).await?;
        if !source.is_open {
            return Err(DomainError::Conflict(format!(
                "source shipment {source_id} is closed"
            )));
        }
        let target: Shipment = self.repo.get_required(target_id).await?;
        if !target.is_open {
            return Err(DomainError::Conflict(format!(
                "target shipment {target_id} is closed"
            )));
        }

        let packages = self.repo.packages_for_partial(partial_id).await?;
        let volume: f64 = packages.iter().map(Package::volume_contribution).sum();
        let weight: f64 = packages.iter().map(Package::weight_contribution).sum();

        let mut patch = Record::new();
        patch.insert(FIELD_SHIPMENT_ID, json!(target_id));
        if let Some(actor) = self.actor().await {
            patch.insert("updatedByUserId", json!(actor));
        }
        let updated = self
            .repo
            .store()
            .update(PartialShipment::TABLE, partial_id, patch)
            .await?;

        if volume != 0.0 || weight != 0.0 {
            self.repo
                .store()
                .increment(
                    Shipment::TABLE,
                    source_id,
                    &[(FIELD_TOTAL_VOLUME, -volume), (FIELD_TOTAL_WEIGHT, -weight)],
                )
                .await?;
            self.repo
                .store()
                .increment(
                    Shipment::TABLE,
                    target_id,
                    &[(FIELD_TOTAL_VOLUME, volume), (FIELD_TOTAL_WEIGHT, weight)],
                )
                .await?;
        }

        metrics::counter!("partial_shipment_transfers_total").increment(1);
        tracing::info!(
            partial = %partial_id,
            from = %source_id,
            to = %target_id,
            volume,
            weight,
            "partial shipment transferred"
        );
        Ok(updated.decode()?)
    }

    // -- Packages and items --

    /// Adds a package to a partial shipment and walks the owning shipment's
    /// running totals up by its contributions.
    #[tracing::instrument(skip(self, input), fields(partial = %input.partial_shipment_id))]
    pub async fn add_package(&self, input: NewPackage) -> Result<Package> {
        let partial: PartialShipment =
            self.repo.get_required(input.partial_shipment_id).await?;
        let actor = self.actor().await;

        let package = self
            .repo
            .create(|id| Package {
                id,
                partial_shipment_id: partial.id,
                length: input.length,
                width: input.width,
                height: input.height,
                weight: input.weight,
                units: input.units,
                created_by_user_id: actor,
                updated_by_user_id: None,
            })
            .await?;

        let volume = package.volume_contribution();
        let weight = package.weight_contribution();
        if volume != 0.0 || weight != 0.0 {
            self.repo
                .store()
                .increment(
                    Shipment::TABLE,
                    partial.shipment_id,
                    &[(FIELD_TOTAL_VOLUME, volume), (FIELD_TOTAL_WEIGHT, weight)],
                )
                .await?;
        }
        Ok(package)
    }

    /// Removes a package and walks the owning shipment's totals back down.
    #[tracing::instrument(skip(self))]
    pub async fn remove_package(&self, package_id: RecordId) -> Result<()> {
        let package: Package = self.repo.get_required(package_id).await?;
        let partial: PartialShipment =
            self.repo.get_required(package.partial_shipment_id).await?;

        self.repo.delete::<Package>(package_id).await?;

        let volume = package.volume_contribution();
        let weight = package.weight_contribution();
        if volume != 0.0 || weight != 0.0 {
            self.repo
                .store()
                .increment(
                    Shipment::TABLE,
                    partial.shipment_id,
                    &[(FIELD_TOTAL_VOLUME, -volume), (FIELD_TOTAL_WEIGHT, -weight)],
                )
                .await?;
        }
        Ok(())
    }

    /// Adds a line item to an existing partial shipment.
    #[tracing::instrument(skip(self, input), fields(partial = %input.partial_shipment_id))]
    pub async fn add_item(&self, input: NewItem) -> Result<PartialShipmentItem> {
        self.repo
            .get_required::<PartialShipment>(input.partial_shipment_id)
            .await?;
        let actor = self.actor().await;

        self.repo
            .create(|id| PartialShipmentItem {
                id,
                partial_shipment_id: input.partial_shipment_id,
                description: input.description,
                quantity: input.quantity,
                created_by_user_id: actor,
                updated_by_user_id: None,
            })
            .await
    }

    /// Removes a line item.
    #[tracing::instrument(skip(self))]
    pub async fn remove_item(&self, item_id: RecordId) -> Result<()> {
        self.repo
            .get_required::<PartialShipmentItem>(item_id)
            .await?;
        self.repo.delete::<PartialShipmentItem>(item_id).await
    }

    // -- Notes --

    /// Updates the owner's note in place, or creates one and stores its id
    /// on the owner.
    ///
    /// Supplied content overwrites; a supplied images list replaces the
    /// stored list. Returns `None` when the owner had no note and the input
    /// was empty; nothing is stored for an empty note.
    #[tracing::instrument(skip(self, input))]
    pub async fn update_note(&self, owner: NoteOwner, input: NoteInput) -> Result<Option<Note>> {
        let actor = self.actor().await;

        match self.owner_note_id(owner).await? {
            Some(note_id) => {
                let patch = NotePatch {
                    content: input.content,
                    images: input.images,
                    user_id: actor,
                };
                let note = self.repo.update::<Note>(note_id, &patch).await?;
                Ok(Some(note))
            }
            None => match self.create_note_if_any(Some(input), actor).await? {
                Some(note_id) => {
                    self.set_owner_note(owner, note_id, actor).await?;
                    Ok(Some(self.repo.get_required(note_id).await?))
                }
                None => Ok(None),
            },
        }
    }

    /// Runs every upload through the image collaborator, returning the
    /// opaque references in order.
    #[tracing::instrument(skip(self, uploads), fields(count = uploads.len()))]
    pub async fn persist_images(&self, uploads: Vec<Vec<u8>>) -> Result<Vec<String>> {
        let mut references = Vec::with_capacity(uploads.len());
        for bytes in uploads {
            references.push(self.images.persist(bytes).await?);
        }
        Ok(references)
    }

    async fn owner_note_id(&self, owner: NoteOwner) -> Result<Option<RecordId>> {
        match owner {
            NoteOwner::Customer(id) => {
                Ok(self.repo.get_required::<Customer>(id).await?.note_id)
            }
            NoteOwner::Shipment(id) => {
                Ok(self.repo.get_required::<Shipment>(id).await?.note_id)
            }
            NoteOwner::PartialShipment(id) => {
                Ok(self.repo.get_required::<PartialShipment>(id).await?.note_id)
            }
        }
    }

    async fn set_owner_note(
        &self,
        owner: NoteOwner,
        note_id: RecordId,
        actor: Option<RecordId>,
    ) -> Result<()> {
        match owner {
            NoteOwner::Customer(id) => {
                let patch = CustomerPatch {
                    note_id: Some(note_id),
                    updated_by_user_id: actor,
                    ..Default::default()
                };
                self.repo.update::<Customer>(id, &patch).await?;
            }
            NoteOwner::Shipment(id) => {
                let patch = ShipmentPatch {
                    note_id: Some(note_id),
                    updated_by_user_id: actor,
                    ..Default::default()
                };
                self.repo.update::<Shipment>(id, &patch).await?;
            }
            NoteOwner::PartialShipment(id) => {
                let patch = PartialShipmentPatch {
                    note_id: Some(note_id),
                    updated_by_user_id: actor,
                    ..Default::default()
                };
                self.repo.update::<PartialShipment>(id, &patch).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{FixedIdentity, MemoryImageStore};
    use table_store::MemoryTableStore;

    fn ops() -> Operations<MemoryTableStore> {
        Operations::new(
            MemoryTableStore::new(),
            Arc::new(FixedIdentity::anonymous()),
            Arc::new(MemoryImageStore::new()),
        )
    }

    fn ops_as(user: RecordId) -> Operations<MemoryTableStore> {
        Operations::new(
            MemoryTableStore::new(),
            Arc::new(FixedIdentity::user(user)),
            Arc::new(MemoryImageStore::new()),
        )
    }

    fn customer_input(name: &str) -> NewCustomer {
        NewCustomer {
            name: name.to_string(),
            phone: "0800".to_string(),
            address: "12 Marina".to_string(),
            origin: Some("Lagos".to_string()),
            note: None,
        }
    }

    fn shipment_input(destination: &str) -> NewShipment {
        NewShipment {
            destination: destination.to_string(),
            driver_name: None,
            driver_vehicle: None,
            note: None,
        }
    }

    fn partial_input(shipment: RecordId, customer: RecordId) -> NewPartialShipment {
        NewPartialShipment {
            shipment_id: shipment,
            customer_id: customer,
            cost: 100.0,
            discount_amount: 0.0,
            extra_cost_amount: 0.0,
            amount_paid: 0.0,
            payment_status: PaymentStatus::Unpaid,
            receiver_name: None,
            receiver_phone: None,
            note: None,
        }
    }

    #[tokio::test]
    async fn create_customer_without_note_sets_no_note_id() {
        let ops = ops();
        let customer = ops.create_customer(customer_input("Ada")).await.unwrap();

        assert!(customer.note_id.is_none());
        assert_eq!(customer.balance, 0.0);
    }

    #[tokio::test]
    async fn create_customer_with_empty_note_creates_no_note() {
        let ops = ops();
        let input = NewCustomer {
            note: Some(NoteInput {
                content: Some(String::new()),
                images: Some(vec![]),
            }),
            ..customer_input("Ada")
        };

        let customer = ops.create_customer(input).await.unwrap();
        assert!(customer.note_id.is_none());
        assert_eq!(ops.repo().list::<Note>().await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn create_customer_with_note_stores_note_and_author() {
        let ops = ops_as(RecordId::new(7));
        let input = NewCustomer {
            note: Some(NoteInput {
                content: Some("VIP".to_string()),
                images: None,
            }),
            ..customer_input("Ada")
        };

        let customer = ops.create_customer(input).await.unwrap();
        let note: Note = ops
            .repo()
            .get_required(customer.note_id.unwrap())
            .await
            .unwrap();

        assert_eq!(note.content.as_deref(), Some("VIP"));
        assert_eq!(note.user_id, Some(RecordId::new(7)));
        assert_eq!(customer.created_by_user_id, Some(RecordId::new(7)));
    }

    #[tokio::test]
    async fn images_only_note_is_created() {
        let ops = ops();
        let input = NewShipment {
            note: Some(NoteInput {
                content: None,
                images: Some(vec!["mem://images/1".to_string()]),
            }),
            ..shipment_input("Lagos")
        };

        let shipment = ops.create_shipment(input).await.unwrap();
        let note: Note = ops
            .repo()
            .get_required(shipment.note_id.unwrap())
            .await
            .unwrap();

        assert!(note.content.is_none());
        assert_eq!(note.images, vec!["mem://images/1".to_string()]);
    }

    #[tokio::test]
    async fn update_note_creates_then_replaces() {
        let ops = ops();
        let customer = ops.create_customer(customer_input("Ada")).await.unwrap();
        let owner = NoteOwner::Customer(customer.id);

        let note = ops
            .update_note(
                owner,
                NoteInput {
                    content: Some("first".to_string()),
                    images: Some(vec!["a".to_string()]),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(note.content.as_deref(), Some("first"));

        let replaced = ops
            .update_note(
                owner,
                NoteInput {
                    content: Some("second".to_string()),
                    images: Some(vec!["b".to_string(), "c".to_string()]),
                },
            )
            .await
            .unwrap()
            .unwrap();

        // Same note record, overwritten rather than appended.
        assert_eq!(replaced.id, note.id);
        assert_eq!(replaced.content.as_deref(), Some("second"));
        assert_eq!(replaced.images, vec!["b".to_string(), "c".to_string()]);
        assert_eq!(ops.repo().list::<Note>().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_note_without_new_images_keeps_old_list() {
        let ops = ops();
        let customer = ops.create_customer(customer_input("Ada")).await.unwrap();
        let owner = NoteOwner::Customer(customer.id);

        ops.update_note(
            owner,
            NoteInput {
                content: Some("first".to_string()),
                images: Some(vec!["a".to_string()]),
            },
        )
        .await
        .unwrap();

        let replaced = ops
            .update_note(
                owner,
                NoteInput {
                    content: Some("second".to_string()),
                    images: None,
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(replaced.images, vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn empty_note_input_on_owner_without_note_stores_nothing() {
        let ops = ops();
        let customer = ops.create_customer(customer_input("Ada")).await.unwrap();

        let result = ops
            .update_note(NoteOwner::Customer(customer.id), NoteInput::default())
            .await
            .unwrap();

        assert!(result.is_none());
        let reloaded: Customer = ops.repo().get_required(customer.id).await.unwrap();
        assert!(reloaded.note_id.is_none());
    }

    #[tokio::test]
    async fn increment_balance_moves_running_total() {
        let ops = ops();
        let customer = ops.create_customer(customer_input("Ada")).await.unwrap();

        ops.increment_balance(customer.id, 25.0).await.unwrap();
        let updated = ops.increment_balance(customer.id, -10.0).await.unwrap();

        assert_eq!(updated.balance, 15.0);
    }

    #[tokio::test]
    async fn zero_delta_is_a_no_op() {
        let ops = ops();
        let customer = ops.create_customer(customer_input("Ada")).await.unwrap();
        ops.increment_balance(customer.id, 9.0).await.unwrap();

        let unchanged = ops.increment_balance(customer.id, 0.0).await.unwrap();
        assert_eq!(unchanged.balance, 9.0);
    }

    #[tokio::test]
    async fn add_package_raises_shipment_totals() {
        let ops = ops();
        let customer = ops.create_customer(customer_input("Ada")).await.unwrap();
        let shipment = ops.create_shipment(shipment_input("Lagos")).await.unwrap();
        let partial = ops
            .create_partial_shipment(partial_input(shipment.id, customer.id))
            .await
            .unwrap();

        ops.add_package(NewPackage {
            partial_shipment_id: partial.id,
            length: 2.0,
            width: 1.0,
            height: 1.0,
            weight: 4.0,
            units: 3,
        })
        .await
        .unwrap();

        let shipment: Shipment = ops.repo().get_required(shipment.id).await.unwrap();
        assert_eq!(shipment.total_volume, 6.0);
        assert_eq!(shipment.total_weight, 12.0);
    }

    #[tokio::test]
    async fn remove_package_lowers_shipment_totals() {
        let ops = ops();
        let customer = ops.create_customer(customer_input("Ada")).await.unwrap();
        let shipment = ops.create_shipment(shipment_input("Lagos")).await.unwrap();
        let partial = ops
            .create_partial_shipment(partial_input(shipment.id, customer.id))
            .await
            .unwrap();
        let package = ops
            .add_package(NewPackage {
                partial_shipment_id: partial.id,
                length: 2.0,
                width: 1.0,
                height: 1.0,
                weight: 4.0,
                units: 3,
            })
            .await
            .unwrap();

        ops.remove_package(package.id).await.unwrap();

        let shipment: Shipment = ops.repo().get_required(shipment.id).await.unwrap();
        assert_eq!(shipment.total_volume, 0.0);
        assert_eq!(shipment.total_weight, 0.0);
    }

    #[tokio::test]
    async fn create_partial_shipment_under_closed_shipment_is_rejected() {
        let ops = ops();
        let customer = ops.create_customer(customer_input("Ada")).await.unwrap();
        let shipment = ops.create_shipment(shipment_input("Lagos")).await.unwrap();
        ops.close_shipment(shipment.id).await.unwrap();

        let result = ops
            .create_partial_shipment(partial_input(shipment.id, customer.id))
            .await;
        assert!(matches!(result, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn delete_customer_with_partials_is_rejected() {
        let ops = ops();
        let customer = ops.create_customer(customer_input("Ada")).await.unwrap();
        let shipment = ops.create_shipment(shipment_input("Lagos")).await.unwrap();
        ops.create_partial_shipment(partial_input(shipment.id, customer.id))
            .await
            .unwrap();

        let result = ops.delete_customer(customer.id).await;
        assert!(matches!(result, Err(DomainError::Conflict(_))));

        // Nothing was deleted.
        assert!(ops.repo().get::<Customer>(customer.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_customer_without_partials_succeeds() {
        let ops = ops();
        let customer = ops.create_customer(customer_input("Ada")).await.unwrap();

        ops.delete_customer(customer.id).await.unwrap();
        assert!(ops.repo().get::<Customer>(customer.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn close_then_reopen_shipment() {
        let ops = ops();
        let shipment = ops.create_shipment(shipment_input("Lagos")).await.unwrap();

        let closed = ops.close_shipment(shipment.id).await.unwrap();
        assert!(!closed.is_open);
        assert!(closed.date_closed.is_some());

        let reopened = ops.reopen_shipment(shipment.id).await.unwrap();
        assert!(reopened.is_open);
        assert!(reopened.date_closed.is_none());

        let again = ops.reopen_shipment(shipment.id).await;
        assert!(matches!(again, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn audit_fields_are_stamped_when_identity_resolves() {
        let ops = ops_as(RecordId::new(3));
        let customer = ops.create_customer(customer_input("Ada")).await.unwrap();
        assert_eq!(customer.created_by_user_id, Some(RecordId::new(3)));

        let updated = ops
            .update_customer(
                customer.id,
                CustomerPatch {
                    phone: Some("0900".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.updated_by_user_id, Some(RecordId::new(3)));
    }

    #[tokio::test]
    async fn audit_fields_stay_absent_without_identity() {
        let ops = ops();
        let customer = ops.create_customer(customer_input("Ada")).await.unwrap();
        assert!(customer.created_by_user_id.is_none());
    }

    #[tokio::test]
    async fn persist_images_returns_references_in_order() {
        let ops = ops();
        let references = ops
            .persist_images(vec![vec![1], vec![2], vec![3]])
            .await
            .unwrap();
        assert_eq!(references.len(), 3);
        assert!(references[0] < references[2]);
    }
}
