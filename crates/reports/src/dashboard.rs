//! Dashboard summary: shipments by status and destination, partial
//! shipments by payment status and customer.

use std::collections::BTreeMap;

use common::RecordId;
use domain::{PartialShipment, PaymentStatus, Shipment};
use serde::Serialize;

/// Derived open/closed status of a shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    Open,
    Closed,
}

impl From<&Shipment> for ShipmentStatus {
    fn from(shipment: &Shipment) -> Self {
        if shipment.is_open {
            Self::Open
        } else {
            Self::Closed
        }
    }
}

impl std::fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// One shipment annotated with its derived status.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentOverview {
    pub id: RecordId,
    pub destination: String,
    pub status: ShipmentStatus,
    pub total_weight: f64,
    pub total_volume: f64,
}

/// Count and weight/volume sums for one shipment group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentGroupStats {
    pub count: usize,
    pub total_weight: f64,
    pub total_volume: f64,
}

impl ShipmentGroupStats {
    fn absorb(&mut self, shipment: &Shipment) {
        self.count += 1;
        self.total_weight += shipment.total_weight;
        self.total_volume += shipment.total_volume;
    }
}

/// The dashboard rollup.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub shipments: Vec<ShipmentOverview>,
    pub by_status: BTreeMap<ShipmentStatus, ShipmentGroupStats>,
    pub by_destination: BTreeMap<String, ShipmentGroupStats>,
    pub partials_by_payment_status: BTreeMap<PaymentStatus, usize>,
    pub partials_by_customer: BTreeMap<RecordId, usize>,
}

/// Computes the dashboard rollup from full listings. Pure and infallible.
pub fn dashboard_summary(
    shipments: &[Shipment],
    partial_shipments: &[PartialShipment],
) -> DashboardSummary {
    let mut summary = DashboardSummary::default();

    for shipment in shipments {
        let status = ShipmentStatus::from(shipment);
        summary.shipments.push(ShipmentOverview {
            id: shipment.id,
            destination: shipment.destination.clone(),
            status,
            total_weight: shipment.total_weight,
            total_volume: shipment.total_volume,
        });

        summary.by_status.entry(status).or_default().absorb(shipment);
        summary
            .by_destination
            .entry(shipment.destination.clone())
            .or_default()
            .absorb(shipment);
    }

    for partial in partial_shipments {
        *summary
            .partials_by_payment_status
            .entry(partial.payment_status)
            .or_default() += 1;
        *summary
            .partials_by_customer
            .entry(partial.customer_id)
            .or_default() += 1;
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shipment(id: i64, destination: &str, open: bool, weight: f64, volume: f64) -> Shipment {
        Shipment {
            id: RecordId::new(id),
            destination: destination.to_string(),
            date_created: chrono::Utc::now(),
            date_closed: None,
            is_open: open,
            total_weight: weight,
            total_volume: volume,
            driver_name: None,
            driver_vehicle: None,
            note_id: None,
            created_by_user_id: None,
            updated_by_user_id: None,
        }
    }

    fn partial(id: i64, customer: i64, status: PaymentStatus) -> PartialShipment {
        PartialShipment {
            id: RecordId::new(id),
            shipment_id: RecordId::new(1),
            customer_id: RecordId::new(customer),
            cost: 0.0,
            discount_amount: 0.0,
            extra_cost_amount: 0.0,
            amount_paid: 0.0,
            payment_status: status,
            note_id: None,
            receiver_name: None,
            receiver_phone: None,
            created_by_user_id: None,
            updated_by_user_id: None,
        }
    }

    #[test]
    fn groups_shipments_by_status_and_destination() {
        let shipments = vec![
            shipment(1, "Lagos", true, 10.0, 4.0),
            shipment(2, "Lagos", false, 6.0, 2.0),
            shipment(3, "Abuja", true, 1.0, 1.0),
        ];

        let summary = dashboard_summary(&shipments, &[]);

        assert_eq!(summary.shipments.len(), 3);
        assert_eq!(summary.shipments[0].status, ShipmentStatus::Open);
        assert_eq!(summary.shipments[1].status, ShipmentStatus::Closed);

        let open = &summary.by_status[&ShipmentStatus::Open];
        assert_eq!(open.count, 2);
        assert_eq!(open.total_weight, 11.0);
        assert_eq!(open.total_volume, 5.0);

        let lagos = &summary.by_destination["Lagos"];
        assert_eq!(lagos.count, 2);
        assert_eq!(lagos.total_weight, 16.0);
    }

    #[test]
    fn counts_partials_by_payment_status_and_customer() {
        let partials = vec![
            partial(1, 1, PaymentStatus::Paid),
            partial(2, 1, PaymentStatus::Unpaid),
            partial(3, 2, PaymentStatus::Paid),
        ];

        let summary = dashboard_summary(&[], &partials);

        assert_eq!(summary.partials_by_payment_status[&PaymentStatus::Paid], 2);
        assert_eq!(summary.partials_by_payment_status[&PaymentStatus::Unpaid], 1);
        assert_eq!(summary.partials_by_customer[&RecordId::new(1)], 2);
        assert_eq!(summary.partials_by_customer[&RecordId::new(2)], 1);
    }

    #[test]
    fn empty_listings_produce_empty_summary() {
        let summary = dashboard_summary(&[], &[]);
        assert!(summary.shipments.is_empty());
        assert!(summary.by_status.is_empty());
        assert!(summary.partials_by_customer.is_empty());
    }
}
