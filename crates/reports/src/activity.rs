//! User activity feed derived from audit fields.

use std::collections::HashMap;

use common::RecordId;
use domain::{Customer, Package, PartialShipment, PartialShipmentItem, Shipment, User};
use serde::Serialize;

/// What happened to the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Create,
    Update,
}

/// Which entity kind the activity concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Shipment,
    PartialShipment,
    Package,
    PartialShipmentItem,
    Customer,
}

/// One attributed create or update.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub kind: ActivityKind,
    pub entity: EntityKind,
    pub entity_id: RecordId,
    pub user_id: RecordId,
    pub username: String,
}

fn push_for(
    feed: &mut Vec<Activity>,
    users: &HashMap<RecordId, &User>,
    entity: EntityKind,
    entity_id: RecordId,
    created_by: Option<RecordId>,
    updated_by: Option<RecordId>,
) {
    // Unknown or absent user ids are silently skipped.
    if let Some(user_id) = created_by
        && let Some(user) = users.get(&user_id)
    {
        feed.push(Activity {
            kind: ActivityKind::Create,
            entity,
            entity_id,
            user_id,
            username: user.username.clone(),
        });
    }
    if let Some(user_id) = updated_by
        && let Some(user) = users.get(&user_id)
    {
        feed.push(Activity {
            kind: ActivityKind::Update,
            entity,
            entity_id,
            user_id,
            username: user.username.clone(),
        });
    }
}

/// Builds the activity feed: one `create` activity per entity whose
/// `createdByUserId` resolves to a known user, one `update` activity per
/// entity whose `updatedByUserId` does. Pure and infallible.
pub fn activity_feed(
    shipments: &[Shipment],
    partial_shipments: &[PartialShipment],
    packages: &[Package],
    items: &[PartialShipmentItem],
    customers: &[Customer],
    users: &[User],
) -> Vec<Activity> {
    let by_id: HashMap<RecordId, &User> = users.iter().map(|user| (user.id, user)).collect();
    let mut feed = Vec::new();

    for shipment in shipments {
        push_for(
            &mut feed,
            &by_id,
            EntityKind::Shipment,
            shipment.id,
            shipment.created_by_user_id,
            shipment.updated_by_user_id,
        );
    }
    for partial in partial_shipments {
        push_for(
            &mut feed,
            &by_id,
            EntityKind::PartialShipment,
            partial.id,
            partial.created_by_user_id,
            partial.updated_by_user_id,
        );
    }
    for package in packages {
        push_for(
            &mut feed,
            &by_id,
            EntityKind::Package,
            package.id,
            package.created_by_user_id,
            package.updated_by_user_id,
        );
    }
    for item in items {
        push_for(
            &mut feed,
            &by_id,
            EntityKind::PartialShipmentItem,
            item.id,
            item.created_by_user_id,
            item.updated_by_user_id,
        );
    }
    for customer in customers {
        push_for(
            &mut feed,
            &by_id,
            EntityKind::Customer,
            customer.id,
            customer.created_by_user_id,
            customer.updated_by_user_id,
        );
    }

    feed
}
