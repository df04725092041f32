use common::RecordId;
use serde::{Deserialize, Serialize};

use super::Entity;

/// A declared line item inside a partial shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialShipmentItem {
    pub id: RecordId,
    pub partial_shipment_id: RecordId,
    pub description: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_user_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by_user_id: Option<RecordId>,
}

impl Entity for PartialShipmentItem {
    const TABLE: &'static str = "partialShipmentItems";
    type Patch = PartialShipmentItemPatch;

    fn id(&self) -> RecordId {
        self.id
    }
}

/// Field subset merged into an existing item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialShipmentItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by_user_id: Option<RecordId>,
}
