//! Customer CRUD, balance and note endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use domain::{
    Customer, CustomerPatch, HydratedCustomer, NewCustomer, NoteInput, NoteOwner,
    hydrate_customer,
};
use serde::Deserialize;
use table_store::TableStore;

use crate::AppState;
use crate::error::ApiError;
use crate::identity::CurrentUser;

use super::{parse_include, record_id};

#[derive(Deserialize)]
pub struct IncludeQuery {
    pub include: Option<String>,
}

#[derive(Deserialize)]
pub struct BalanceRequest {
    pub delta: f64,
}

/// POST /customers — create a customer with an optional note.
pub async fn create<S: TableStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<NewCustomer>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    let customer = state.ops(user).create_customer(input).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// GET /customers — list all customers.
pub async fn list<S: TableStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<Customer>>, ApiError> {
    Ok(Json(state.repo().list::<Customer>().await?))
}

/// GET /customers/{id} — fetch one customer, optionally with its note.
pub async fn get<S: TableStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
    Query(query): Query<IncludeQuery>,
) -> Result<Json<HydratedCustomer>, ApiError> {
    let include = parse_include(query.include.as_deref())?;
    let repo = state.repo();
    let customer = repo.get_required::<Customer>(record_id(id)).await?;
    Ok(Json(hydrate_customer(&repo, customer, include).await?))
}

/// PATCH /customers/{id} — merge the given fields.
pub async fn update<S: TableStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    Json(patch): Json<CustomerPatch>,
) -> Result<Json<Customer>, ApiError> {
    let customer = state.ops(user).update_customer(record_id(id), patch).await?;
    Ok(Json(customer))
}

/// DELETE /customers/{id} — delete when nothing references the customer.
pub async fn remove<S: TableStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.ops(user).delete_customer(record_id(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /customers/{id}/balance — atomically shift the balance.
pub async fn increment_balance<S: TableStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    Json(request): Json<BalanceRequest>,
) -> Result<Json<Customer>, ApiError> {
    let customer = state
        .ops(user)
        .increment_balance(record_id(id), request.delta)
        .await?;
    Ok(Json(customer))
}

/// PUT /customers/{id}/note — create or replace the customer's note.
pub async fn put_note<S: TableStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    Json(input): Json<NoteInput>,
) -> Result<Json<Option<domain::Note>>, ApiError> {
    let note = state
        .ops(user)
        .update_note(NoteOwner::Customer(record_id(id)), input)
        .await?;
    Ok(Json(note))
}
