//! Customer summary: top-10 rankings and counts by origin.

use std::collections::BTreeMap;
use std::collections::HashMap;

use common::RecordId;
use domain::{Customer, PartialShipment};
use serde::Serialize;

/// Rankings keep at most this many customers.
const TOP_N: usize = 10;

/// One ranked customer with the metric that placed it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRanking {
    pub customer_id: RecordId,
    pub name: String,
    pub value: f64,
}

/// The customer rollup.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    pub top_by_balance: Vec<CustomerRanking>,
    pub top_by_partial_shipments: Vec<CustomerRanking>,
    pub top_by_revenue: Vec<CustomerRanking>,
    pub by_origin: BTreeMap<String, usize>,
}

/// Stable descending top-N: ties retain the original listing order.
fn top_n(customers: &[Customer], metric: impl Fn(&Customer) -> f64) -> Vec<CustomerRanking> {
    let mut ranked: Vec<CustomerRanking> = customers
        .iter()
        .map(|customer| CustomerRanking {
            customer_id: customer.id,
            name: customer.name.clone(),
            value: metric(customer),
        })
        .collect();
    ranked.sort_by(|a, b| b.value.total_cmp(&a.value));
    ranked.truncate(TOP_N);
    ranked
}

/// Computes the customer rollup from full listings. Pure and infallible.
pub fn customer_summary(
    customers: &[Customer],
    partial_shipments: &[PartialShipment],
) -> CustomerSummary {
    let mut partial_counts: HashMap<RecordId, usize> = HashMap::new();
    let mut revenue: HashMap<RecordId, f64> = HashMap::new();
    for partial in partial_shipments {
        *partial_counts.entry(partial.customer_id).or_default() += 1;
        *revenue.entry(partial.customer_id).or_default() += partial.revenue();
    }

    let mut by_origin: BTreeMap<String, usize> = BTreeMap::new();
    for customer in customers {
        let origin = customer
            .origin
            .as_deref()
            .filter(|origin| !origin.is_empty())
            .unwrap_or("Unknown");
        *by_origin.entry(origin.to_string()).or_default() += 1;
    }

    CustomerSummary {
        top_by_balance: top_n(customers, |customer| customer.balance),
        top_by_partial_shipments: top_n(customers, |customer| {
            partial_counts.get(&customer.id).copied().unwrap_or(0) as f64
        }),
        top_by_revenue: top_n(customers, |customer| {
            revenue.get(&customer.id).copied().unwrap_or(0.0)
        }),
        by_origin,
    }
}
