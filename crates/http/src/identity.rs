//! Caller identity extraction.
//!
//! Authentication itself happens upstream; handlers that need to know who is
//! calling extract [`CurrentUser`] from the `x-user-id` header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::error::AppError;

/// Header carrying the authenticated caller's id
pub const USER_ID_HEADER: &str = "x-user-id";

/// Identity of the authenticated caller.
///
/// Extraction fails with 401 when the header is absent or not a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub Uuid);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("missing x-user-id header"))?;

        let user_id = raw
            .parse::<Uuid>()
            .map_err(|_| AppError::unauthorized("x-user-id header is not a valid UUID"))?;

        Ok(Self(user_id))
    }
}
