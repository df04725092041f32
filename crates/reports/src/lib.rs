//! Derived, read-only rollups over the shipping entities.
//!
//! The aggregation functions are pure: they take entity listings and group,
//! sum and rank in memory without touching the store, so each is trivially
//! testable on synthetic data. [`ReportService`] is the scanning front door
//! that feeds them from repository listings. Missing optional relations
//! (absent notes, unknown audit users) degrade to skips, never errors.

pub mod activity;
pub mod customers;
pub mod dashboard;
pub mod financial;
pub mod service;

pub use activity::{Activity, ActivityKind, EntityKind, activity_feed};
pub use customers::{CustomerRanking, CustomerSummary, customer_summary};
pub use dashboard::{
    DashboardSummary, ShipmentGroupStats, ShipmentOverview, ShipmentStatus, dashboard_summary,
};
pub use financial::{FinancialSummary, PaymentStatusBreakdown, financial_summary};
pub use service::ReportService;
