//! Entity types persisted in the table store.
//!
//! Every entity serializes with its original camelCase field names, so the
//! persisted records stay readable by any store client. Optional fields are
//! skipped when absent (absent means absent, not null), and each entity has
//! a `Patch` struct whose serialized fields form the merge set for partial
//! updates.

pub mod customer;
pub mod item;
pub mod note;
pub mod package;
pub mod partial_shipment;
pub mod shipment;
pub mod user;

pub use customer::{Customer, CustomerPatch};
pub use item::{PartialShipmentItem, PartialShipmentItemPatch};
pub use note::{Note, NotePatch};
pub use package::{Package, PackagePatch};
pub use partial_shipment::{PartialShipment, PartialShipmentPatch, PaymentStatus};
pub use shipment::{Shipment, ShipmentPatch};
pub use user::{User, UserPatch};

use common::RecordId;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A typed record living in one named table.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The table this entity is stored in.
    const TABLE: &'static str;

    /// The partial-update type: all-optional fields, serialized fields form
    /// the merge set.
    type Patch: Serialize + Send + Sync;

    /// The entity's primary key.
    fn id(&self) -> RecordId;
}
