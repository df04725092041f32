//! Shipment batch CRUD, lifecycle and note endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use domain::{
    HydratedShipment, NewShipment, NoteInput, NoteOwner, Shipment, ShipmentPatch,
    hydrate_shipment,
};
use table_store::TableStore;

use crate::AppState;
use crate::error::ApiError;
use crate::identity::CurrentUser;

use super::customers::IncludeQuery;
use super::{parse_include, record_id};

/// POST /shipments — open a new batch with an optional note.
pub async fn create<S: TableStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<NewShipment>,
) -> Result<(StatusCode, Json<Shipment>), ApiError> {
    let shipment = state.ops(user).create_shipment(input).await?;
    Ok((StatusCode::CREATED, Json(shipment)))
}

/// GET /shipments — list all batches.
pub async fn list<S: TableStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<Shipment>>, ApiError> {
    Ok(Json(state.repo().list::<Shipment>().await?))
}

/// GET /shipments/{id} — fetch one batch, optionally with its note.
pub async fn get<S: TableStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
    Query(query): Query<IncludeQuery>,
) -> Result<Json<HydratedShipment>, ApiError> {
    let include = parse_include(query.include.as_deref())?;
    let repo = state.repo();
    let shipment = repo.get_required::<Shipment>(record_id(id)).await?;
    Ok(Json(hydrate_shipment(&repo, shipment, include).await?))
}

/// PATCH /shipments/{id} — merge the given fields.
pub async fn update<S: TableStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    Json(patch): Json<ShipmentPatch>,
) -> Result<Json<Shipment>, ApiError> {
    let shipment = state.ops(user).update_shipment(record_id(id), patch).await?;
    Ok(Json(shipment))
}

/// DELETE /shipments/{id} — delete when nothing references the batch.
pub async fn remove<S: TableStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.ops(user).delete_shipment(record_id(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /shipments/{id}/close — finalize an open batch.
pub async fn close<S: TableStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Shipment>, ApiError> {
    Ok(Json(state.ops(user).close_shipment(record_id(id)).await?))
}

/// POST /shipments/{id}/reopen — reopen a closed batch.
pub async fn reopen<S: TableStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Shipment>, ApiError> {
    Ok(Json(state.ops(user).reopen_shipment(record_id(id)).await?))
}

/// PUT /shipments/{id}/note — create or replace the batch's note.
pub async fn put_note<S: TableStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    Json(input): Json<NoteInput>,
) -> Result<Json<Option<domain::Note>>, ApiError> {
    let note = state
        .ops(user)
        .update_note(NoteOwner::Shipment(record_id(id)), input)
        .await?;
    Ok(Json(note))
}
