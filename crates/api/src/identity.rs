//! Per-request identity resolution.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use common::RecordId;

/// The caller behind the current request, if any.
///
/// Session issuance and verification live outside the core; by the time a
/// request reaches these handlers the authenticated user id travels in the
/// `x-user-id` header. A missing or unparseable header is a normal
/// anonymous request, not an error.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Option<RecordId>);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<i64>().ok())
            .map(RecordId::new);
        Ok(Self(user))
    }
}
