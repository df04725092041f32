//! Partial shipment CRUD, hydration, transfer, package and item endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use domain::{
    HydratedPartialShipment, NewItem, NewPackage, NewPartialShipment, NoteInput, NoteOwner,
    Package, PartialShipment, PartialShipmentItem, PartialShipmentPatch,
    hydrate_partial_shipment,
};
use serde::Deserialize;
use table_store::TableStore;

use crate::AppState;
use crate::error::ApiError;
use crate::identity::CurrentUser;

use super::customers::IncludeQuery;
use super::{parse_include, record_id};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub source_shipment_id: i64,
    pub target_shipment_id: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageRequest {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub weight: f64,
    pub units: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    pub description: String,
    pub quantity: u32,
}

/// POST /partial-shipments — create a consignment under an open batch.
pub async fn create<S: TableStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<NewPartialShipment>,
) -> Result<(StatusCode, Json<PartialShipment>), ApiError> {
    let partial = state.ops(user).create_partial_shipment(input).await?;
    Ok((StatusCode::CREATED, Json(partial)))
}

/// GET /partial-shipments — list all consignments, hydrated per `include`.
pub async fn list<S: TableStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<IncludeQuery>,
) -> Result<Json<Vec<HydratedPartialShipment>>, ApiError> {
    let include = parse_include(query.include.as_deref())?;
    let repo = state.repo();

    let partials = repo.list::<PartialShipment>().await?;
    let mut hydrated = Vec::with_capacity(partials.len());
    for partial in partials {
        hydrated.push(hydrate_partial_shipment(&repo, partial, include).await?);
    }
    Ok(Json(hydrated))
}

/// GET /partial-shipments/{id} — fetch one consignment, hydrated per
/// `include`.
pub async fn get<S: TableStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
    Query(query): Query<IncludeQuery>,
) -> Result<Json<HydratedPartialShipment>, ApiError> {
    let include = parse_include(query.include.as_deref())?;
    let repo = state.repo();
    let partial = repo.get_required::<PartialShipment>(record_id(id)).await?;
    Ok(Json(
        hydrate_partial_shipment(&repo, partial, include).await?,
    ))
}

/// PATCH /partial-shipments/{id} — merge the given fields.
pub async fn update<S: TableStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    Json(patch): Json<PartialShipmentPatch>,
) -> Result<Json<PartialShipment>, ApiError> {
    let partial = state
        .ops(user)
        .update_partial_shipment(record_id(id), patch)
        .await?;
    Ok(Json(partial))
}

/// DELETE /partial-shipments/{id} — remove the consignment with its
/// packages and items, walking the batch totals back down.
pub async fn remove<S: TableStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.ops(user).delete_partial_shipment(record_id(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /partial-shipments/{id}/transfer — move the consignment between
/// open batches.
pub async fn transfer<S: TableStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    Json(request): Json<TransferRequest>,
) -> Result<Json<PartialShipment>, ApiError> {
    let partial = state
        .ops(user)
        .transfer_partial_shipment(
            record_id(id),
            record_id(request.source_shipment_id),
            record_id(request.target_shipment_id),
        )
        .await?;
    Ok(Json(partial))
}

/// PUT /partial-shipments/{id}/note — create or replace the note.
pub async fn put_note<S: TableStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    Json(input): Json<NoteInput>,
) -> Result<Json<Option<domain::Note>>, ApiError> {
    let note = state
        .ops(user)
        .update_note(NoteOwner::PartialShipment(record_id(id)), input)
        .await?;
    Ok(Json(note))
}

/// POST /partial-shipments/{id}/packages — add a package and raise the
/// batch totals.
pub async fn add_package<S: TableStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    Json(request): Json<PackageRequest>,
) -> Result<(StatusCode, Json<Package>), ApiError> {
    let package = state
        .ops(user)
        .add_package(NewPackage {
            partial_shipment_id: record_id(id),
            length: request.length,
            width: request.width,
            height: request.height,
            weight: request.weight,
            units: request.units,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(package)))
}

/// DELETE /packages/{id} — remove a package and lower the batch totals.
pub async fn remove_package<S: TableStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.ops(user).remove_package(record_id(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /partial-shipments/{id}/items — add a line item.
pub async fn add_item<S: TableStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    Json(request): Json<ItemRequest>,
) -> Result<(StatusCode, Json<PartialShipmentItem>), ApiError> {
    let item = state
        .ops(user)
        .add_item(NewItem {
            partial_shipment_id: record_id(id),
            description: request.description,
            quantity: request.quantity,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// DELETE /items/{id} — remove a line item.
pub async fn remove_item<S: TableStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.ops(user).remove_item(record_id(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
