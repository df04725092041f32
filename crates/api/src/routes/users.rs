//! User endpoints.
//!
//! Password hashing and session issuance happen outside the core; these
//! handlers only persist and list the user records that notes and audit
//! fields point at. Responses never carry the password hash.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use common::RecordId;
use domain::{NewUser, User};
use serde::Serialize;
use table_store::TableStore;

use crate::AppState;
use crate::error::ApiError;
use crate::identity::CurrentUser;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: RecordId,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

/// POST /users — create a user.
pub async fn create<S: TableStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<NewUser>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let created = state.ops(user).create_user(input).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// GET /users — list users.
pub async fn list<S: TableStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.repo().list::<User>().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
