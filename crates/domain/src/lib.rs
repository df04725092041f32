//! Domain layer for the shipping-operations backend.
//!
//! Builds the typed world on top of the schemaless table store:
//! - entity types and per-entity patch structs ([`entities`])
//! - a typed repository with foreign-key scan helpers ([`repo`])
//! - the hydration engine attaching related entities on read ([`hydrate`])
//! - multi-step domain operations preserving referential and numeric
//!   invariants ([`ops`])
//! - collaborator traits for identity stamping and image persistence
//!   ([`context`])

pub mod context;
pub mod entities;
pub mod error;
pub mod hydrate;
pub mod ops;
pub mod repo;

pub use common::RecordId;
pub use context::{FixedIdentity, IdentityResolver, ImageStore, MemoryImageStore};
pub use entities::{
    Customer, CustomerPatch, Entity, Note, NotePatch, Package, PackagePatch, PartialShipment,
    PartialShipmentItem, PartialShipmentItemPatch, PartialShipmentPatch, PaymentStatus, Shipment,
    ShipmentPatch, User, UserPatch,
};
pub use error::{DomainError, Result};
pub use hydrate::{
    HydratedCustomer, HydratedPartialShipment, HydratedShipment, Include,
    hydrate_customer, hydrate_partial_shipment, hydrate_shipment,
};
pub use ops::{
    NewCustomer, NewItem, NewPackage, NewPartialShipment, NewShipment, NewUser, NoteInput,
    NoteOwner, Operations,
};
pub use repo::Repository;
