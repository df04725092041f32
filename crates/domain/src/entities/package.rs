use common::RecordId;
use serde::{Deserialize, Serialize};

use super::Entity;

/// A physical package inside a partial shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: RecordId,
    pub partial_shipment_id: RecordId,
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub weight: f64,
    pub units: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_user_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by_user_id: Option<RecordId>,
}

impl Package {
    /// Contribution to the owning shipment's total volume:
    /// `length × width × height × units`.
    pub fn volume_contribution(&self) -> f64 {
        self.length * self.width * self.height * f64::from(self.units)
    }

    /// Contribution to the owning shipment's total weight:
    /// `weight × units`.
    pub fn weight_contribution(&self) -> f64 {
        self.weight * f64::from(self.units)
    }
}

impl Entity for Package {
    const TABLE: &'static str = "packages";
    type Patch = PackagePatch;

    fn id(&self) -> RecordId {
        self.id
    }
}

/// Field subset merged into an existing package.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by_user_id: Option<RecordId>,
}
