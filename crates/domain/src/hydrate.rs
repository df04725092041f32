//! Hydration engine: attaching related entities to a base entity on read.
//!
//! Hydration is driven entirely by an explicit [`Include`] configuration so
//! bulk listing endpoints never over-fetch: an unrequested relation costs no
//! lookup, and the set of lookups performed depends only on the entity's
//! foreign keys and the options, never on what the lookups return. A
//! requested relation that resolves to nothing (no attached note, dangling
//! reference) hydrates to `None` rather than an error.

use serde::Serialize;
use table_store::TableStore;

use crate::entities::{Customer, Note, Package, PartialShipment, PartialShipmentItem, Shipment};
use crate::error::Result;
use crate::repo::Repository;

/// Which relations to attach when hydrating. Everything defaults to off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Include {
    pub customer: bool,
    pub shipment: bool,
    pub packages: bool,
    pub items: bool,
    pub note: bool,
}

impl Include {
    /// No relations: hydration is the identity.
    pub fn none() -> Self {
        Self::default()
    }

    /// Every relation the entity supports.
    pub fn all() -> Self {
        Self {
            customer: true,
            shipment: true,
            packages: true,
            items: true,
            note: true,
        }
    }

    pub fn customer(mut self) -> Self {
        self.customer = true;
        self
    }

    pub fn shipment(mut self) -> Self {
        self.shipment = true;
        self
    }

    pub fn packages(mut self) -> Self {
        self.packages = true;
        self
    }

    pub fn items(mut self) -> Self {
        self.items = true;
        self
    }

    pub fn note(mut self) -> Self {
        self.note = true;
        self
    }
}

/// A partial shipment with its requested relations attached.
///
/// A `None` relation was either not requested or resolved to nothing; in
/// serialized form unresolved fields are simply absent.
#[derive(Debug, Clone, Serialize)]
pub struct HydratedPartialShipment {
    #[serde(flatten)]
    pub partial_shipment: PartialShipment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipment: Option<Shipment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packages: Option<Vec<Package>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<PartialShipmentItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Note>,
}

/// A customer with its note attached.
#[derive(Debug, Clone, Serialize)]
pub struct HydratedCustomer {
    #[serde(flatten)]
    pub customer: Customer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Note>,
}

/// A shipment with its note attached.
#[derive(Debug, Clone, Serialize)]
pub struct HydratedShipment {
    #[serde(flatten)]
    pub shipment: Shipment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Note>,
}

async fn note_for<S: TableStore>(
    repo: &Repository<S>,
    note_id: Option<common::RecordId>,
) -> Result<Option<Note>> {
    match note_id {
        Some(note_id) => repo.get::<Note>(note_id).await,
        None => Ok(None),
    }
}

/// Attaches the requested relations to a partial shipment.
pub async fn hydrate_partial_shipment<S: TableStore>(
    repo: &Repository<S>,
    partial_shipment: PartialShipment,
    include: Include,
) -> Result<HydratedPartialShipment> {
    let customer = if include.customer {
        repo.get::<Customer>(partial_shipment.customer_id).await?
    } else {
        None
    };
    let shipment = if include.shipment {
        repo.get::<Shipment>(partial_shipment.shipment_id).await?
    } else {
        None
    };
    let packages = if include.packages {
        Some(repo.packages_for_partial(partial_shipment.id).await?)
    } else {
        None
    };
    let items = if include.items {
        Some(repo.items_for_partial(partial_shipment.id).await?)
    } else {
        None
    };
    let note = if include.note {
        note_for(repo, partial_shipment.note_id).await?
    } else {
        None
    };

    Ok(HydratedPartialShipment {
        partial_shipment,
        customer,
        shipment,
        packages,
        items,
        note,
    })
}

/// Attaches the requested relations to a customer (only the note applies).
pub async fn hydrate_customer<S: TableStore>(
    repo: &Repository<S>,
    customer: Customer,
    include: Include,
) -> Result<HydratedCustomer> {
    let note = if include.note {
        note_for(repo, customer.note_id).await?
    } else {
        None
    };

    Ok(HydratedCustomer { customer, note })
}

/// Attaches the requested relations to a shipment (only the note applies).
pub async fn hydrate_shipment<S: TableStore>(
    repo: &Repository<S>,
    shipment: Shipment,
    include: Include,
) -> Result<HydratedShipment> {
    let note = if include.note {
        note_for(repo, shipment.note_id).await?
    } else {
        None
    };

    Ok(HydratedShipment { shipment, note })
}
