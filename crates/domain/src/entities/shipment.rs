use chrono::{DateTime, Utc};
use common::RecordId;
use serde::{Deserialize, Serialize};

use super::Entity;

/// JSON fields holding the running totals; mutated only through atomic
/// store increments (and the close/reopen lifecycle for the flags).
pub const FIELD_TOTAL_WEIGHT: &str = "totalWeight";
pub const FIELD_TOTAL_VOLUME: &str = "totalVolume";
pub const FIELD_IS_OPEN: &str = "isOpen";
pub const FIELD_DATE_CLOSED: &str = "dateClosed";

/// A shipment batch headed to one destination.
///
/// `total_weight` / `total_volume` are running sums over the packages of the
/// contained partial shipments. They are a derived cache maintained by the
/// domain operations, recomputable from the packages table, and are absent
/// from [`ShipmentPatch`]: they move only through atomic store increments.
/// The open/closed lifecycle likewise has its own operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub id: RecordId,
    pub destination: String,
    pub date_created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_closed: Option<DateTime<Utc>>,
    pub is_open: bool,
    #[serde(default)]
    pub total_weight: f64,
    #[serde(default)]
    pub total_volume: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_vehicle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_user_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by_user_id: Option<RecordId>,
}

impl Entity for Shipment {
    const TABLE: &'static str = "shipments";
    type Patch = ShipmentPatch;

    fn id(&self) -> RecordId {
        self.id
    }
}

/// Field subset merged into an existing shipment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_vehicle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by_user_id: Option<RecordId>,
}
