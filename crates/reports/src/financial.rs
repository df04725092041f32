//! Financial summary: money sums and per-payment-status breakdown.

use std::collections::BTreeMap;

use domain::{PartialShipment, PaymentStatus};
use serde::Serialize;

/// Count and cost sum for one payment status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusBreakdown {
    pub count: usize,
    pub cost: f64,
}

/// The financial rollup across all partial shipments.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub cost: f64,
    pub discount_amount: f64,
    pub extra_cost_amount: f64,
    pub amount_paid: f64,
    /// `cost + extraCost − discount − amountPaid`.
    pub outstanding: f64,
    pub by_payment_status: BTreeMap<PaymentStatus, PaymentStatusBreakdown>,
}

/// Computes the financial rollup from a full listing. Pure and infallible.
pub fn financial_summary(partial_shipments: &[PartialShipment]) -> FinancialSummary {
    let mut summary = FinancialSummary::default();

    for partial in partial_shipments {
        summary.cost += partial.cost;
        summary.discount_amount += partial.discount_amount;
        summary.extra_cost_amount += partial.extra_cost_amount;
        summary.amount_paid += partial.amount_paid;

        let breakdown = summary
            .by_payment_status
            .entry(partial.payment_status)
            .or_default();
        breakdown.count += 1;
        breakdown.cost += partial.cost;
    }

    summary.outstanding =
        summary.cost + summary.extra_cost_amount - summary.discount_amount - summary.amount_paid;
    summary
}
