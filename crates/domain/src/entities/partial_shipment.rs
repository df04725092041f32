use common::RecordId;
use serde::{Deserialize, Serialize};

use super::Entity;

/// JSON field holding the owning shipment; reassigned only by the transfer
/// operation.
pub const FIELD_SHIPMENT_ID: &str = "shipmentId";

/// How far a partial shipment has been paid for.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    PartiallyPaid,
    Paid,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unpaid => write!(f, "unpaid"),
            Self::PartiallyPaid => write!(f, "partially_paid"),
            Self::Paid => write!(f, "paid"),
        }
    }
}

/// One customer's consignment within a shipment batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialShipment {
    pub id: RecordId,
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_user_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by_user_id: Option<RecordId>,
}

impl PartialShipment {
    /// Revenue net of discount: `cost + extraCost − discount`.
    pub fn revenue(&self) -> f64 {
        self.cost + self.extra_cost_amount - self.discount_amount
    }

    /// Amount still owed: revenue minus what has been paid.
    pub fn outstanding(&self) -> f64 {
        self.revenue() - self.amount_paid
    }
}

impl Entity for PartialShipment {
    const TABLE: &'static str = "partialShipments";
    type Patch = PartialShipmentPatch;

    fn id(&self) -> RecordId {
        self.id
    }
}

/// Field subset merged into an existing partial shipment.
///
/// `shipmentId` is deliberately absent: reassignment between batches must go
/// through the transfer operation so the shipment totals move with it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialShipmentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_cost_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_paid: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by_user_id: Option<RecordId>,
}
