//! Raw image upload endpoint.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;
use table_store::TableStore;

use crate::AppState;
use crate::error::ApiError;

#[derive(Serialize)]
pub struct UploadResponse {
    pub reference: String,
}

/// POST /uploads — persist raw image bytes, returning the opaque reference
/// to put in a note's image list.
pub async fn create<S: TableStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    body: Bytes,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    if body.is_empty() {
        return Err(ApiError::BadRequest("empty upload body".to_string()));
    }

    let reference = state.images().persist(body.to_vec()).await?;
    Ok((StatusCode::CREATED, Json(UploadResponse { reference })))
}
