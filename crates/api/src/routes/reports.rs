//! Read-only rollup endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use reports::{Activity, CustomerSummary, DashboardSummary, FinancialSummary};
use table_store::TableStore;

use crate::AppState;
use crate::error::ApiError;

/// GET /reports/dashboard — shipment and partial-shipment groupings.
pub async fn dashboard<S: TableStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<DashboardSummary>, ApiError> {
    Ok(Json(state.reports().dashboard().await?))
}

/// GET /reports/financial — money sums and payment-status breakdown.
pub async fn financial<S: TableStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<FinancialSummary>, ApiError> {
    Ok(Json(state.reports().financial().await?))
}

/// GET /reports/customers — rankings and origin counts.
pub async fn customers<S: TableStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<CustomerSummary>, ApiError> {
    Ok(Json(state.reports().customers().await?))
}

/// GET /reports/activity — attributed create/update feed.
pub async fn activity<S: TableStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<Activity>>, ApiError> {
    Ok(Json(state.reports().activity().await?))
}
