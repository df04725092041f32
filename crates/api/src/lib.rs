//! HTTP boundary for the shipping-operations backend.
//!
//! Thin route handlers over the domain operations and report service, with
//! structured logging (tracing) and Prometheus metrics. No business logic
//! lives here: handlers translate requests, call the core, and map errors
//! to status codes.

pub mod config;
pub mod error;
pub mod identity;
pub mod images;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, patch, post, put};
use common::RecordId;
use domain::{FixedIdentity, ImageStore, Operations, Repository};
use metrics_exporter_prometheus::PrometheusHandle;
use reports::ReportService;
use table_store::TableStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state: the table store plus the image collaborator.
///
/// Identity is per-request, so [`AppState::ops`] builds a fresh operations
/// service around the resolved caller for each call.
pub struct AppState<S> {
    store: S,
    images: Arc<dyn ImageStore>,
}

impl<S: TableStore + Clone> AppState<S> {
    /// Creates application state over a store and an image store.
    pub fn new(store: S, images: Arc<dyn ImageStore>) -> Self {
        Self { store, images }
    }

    /// Domain operations acting as the given caller.
    pub fn ops(&self, user: Option<RecordId>) -> Operations<S> {
        Operations::new(
            self.store.clone(),
            Arc::new(FixedIdentity::from(user)),
            self.images.clone(),
        )
    }

    /// Typed repository for plain reads.
    pub fn repo(&self) -> Repository<S> {
        Repository::new(self.store.clone())
    }

    /// Report service for the rollup endpoints.
    pub fn reports(&self) -> ReportService<S> {
        ReportService::new(self.store.clone())
    }

    /// The image persistence collaborator.
    pub fn images(&self) -> &Arc<dyn ImageStore> {
        &self.images
    }
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: TableStore + Clone + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/uploads", post(routes::uploads::create::<S>))
        .route("/users", post(routes::users::create::<S>))
        .route("/users", get(routes::users::list::<S>))
        .route("/customers", post(routes::customers::create::<S>))
        .route("/customers", get(routes::customers::list::<S>))
        .route("/customers/{id}", get(routes::customers::get::<S>))
        .route("/customers/{id}", patch(routes::customers::update::<S>))
        .route("/customers/{id}", delete(routes::customers::remove::<S>))
        .route(
            "/customers/{id}/balance",
            post(routes::customers::increment_balance::<S>),
        )
        .route("/customers/{id}/note", put(routes::customers::put_note::<S>))
        .route("/shipments", post(routes::shipments::create::<S>))
        .route("/shipments", get(routes::shipments::list::<S>))
        .route("/shipments/{id}", get(routes::shipments::get::<S>))
        .route("/shipments/{id}", patch(routes::shipments::update::<S>))
        .route("/shipments/{id}", delete(routes::shipments::remove::<S>))
        .route("/shipments/{id}/close", post(routes::shipments::close::<S>))
        .route("/shipments/{id}/reopen", post(routes::shipments::reopen::<S>))
        .route("/shipments/{id}/note", put(routes::shipments::put_note::<S>))
        .route(
            "/partial-shipments",
            post(routes::partial_shipments::create::<S>),
        )
        .route(
            "/partial-shipments",
            get(routes::partial_shipments::list::<S>),
        )
        .route(
            "/partial-shipments/{id}",
            get(routes::partial_shipments::get::<S>),
        )
        .route(
            "/partial-shipments/{id}",
            patch(routes::partial_shipments::update::<S>),
        )
        .route(
            "/partial-shipments/{id}",
            delete(routes::partial_shipments::remove::<S>),
        )
        .route(
            "/partial-shipments/{id}/transfer",
            post(routes::partial_shipments::transfer::<S>),
        )
        .route(
            "/partial-shipments/{id}/note",
            put(routes::partial_shipments::put_note::<S>),
        )
        .route(
            "/partial-shipments/{id}/packages",
            post(routes::partial_shipments::add_package::<S>),
        )
        .route(
            "/partial-shipments/{id}/items",
            post(routes::partial_shipments::add_item::<S>),
        )
        .route(
            "/packages/{id}",
            delete(routes::partial_shipments::remove_package::<S>),
        )
        .route(
            "/items/{id}",
            delete(routes::partial_shipments::remove_item::<S>),
        )
        .route("/reports/dashboard", get(routes::reports::dashboard::<S>))
        .route("/reports/financial", get(routes::reports::financial::<S>))
        .route("/reports/customers", get(routes::reports::customers::<S>))
        .route("/reports/activity", get(routes::reports::activity::<S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
