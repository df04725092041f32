//! Scanning front door: feeds repository listings to the pure rollups.

use domain::{
    Customer, DomainError, Package, PartialShipment, PartialShipmentItem, Repository, Shipment,
    User,
};
use table_store::TableStore;

use crate::activity::{Activity, activity_feed};
use crate::customers::{CustomerSummary, customer_summary};
use crate::dashboard::{DashboardSummary, dashboard_summary};
use crate::financial::{FinancialSummary, financial_summary};

/// Computes rollups by scanning repository listings. Never mutates.
#[derive(Clone)]
pub struct ReportService<S> {
    repo: Repository<S>,
}

impl<S: TableStore> ReportService<S> {
    /// Creates a report service over the given table store.
    pub fn new(store: S) -> Self {
        Self {
            repo: Repository::new(store),
        }
    }

    /// Shipment and partial-shipment groupings for the dashboard.
    #[tracing::instrument(skip(self))]
    pub async fn dashboard(&self) -> Result<DashboardSummary, DomainError> {
        let shipments = self.repo.list::<Shipment>().await?;
        let partials = self.repo.list::<PartialShipment>().await?;

        metrics::counter!("reports_dashboard_total").increment(1);
        Ok(dashboard_summary(&shipments, &partials))
    }

    /// Money sums and payment-status breakdown.
    #[tracing::instrument(skip(self))]
    pub async fn financial(&self) -> Result<FinancialSummary, DomainError> {
        let partials = self.repo.list::<PartialShipment>().await?;

        metrics::counter!("reports_financial_total").increment(1);
        Ok(financial_summary(&partials))
    }

    /// Customer rankings and origin counts.
    #[tracing::instrument(skip(self))]
    pub async fn customers(&self) -> Result<CustomerSummary, DomainError> {
        let customers = self.repo.list::<Customer>().await?;
        let partials = self.repo.list::<PartialShipment>().await?;

        metrics::counter!("reports_customers_total").increment(1);
        Ok(customer_summary(&customers, &partials))
    }

    /// Attributed create/update feed across the audited entities.
    #[tracing::instrument(skip(self))]
    pub async fn activity(&self) -> Result<Vec<Activity>, DomainError> {
        let shipments = self.repo.list::<Shipment>().await?;
        let partials = self.repo.list::<PartialShipment>().await?;
        let packages = self.repo.list::<Package>().await?;
        let items = self.repo.list::<PartialShipmentItem>().await?;
        let customers = self.repo.list::<Customer>().await?;
        let users = self.repo.list::<User>().await?;

        metrics::counter!("reports_activity_total").increment(1);
        Ok(activity_feed(
            &shipments, &partials, &packages, &items, &customers, &users,
        ))
    }
}
