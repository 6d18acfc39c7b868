use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use mindflow_persist::OWNER_HEADER;

use crate::error::ApiError;

/// Authenticated user id, forwarded by the auth layer in `x-user-id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for OwnerId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(OWNER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|owner| !owner.is_empty())
            .map(|owner| OwnerId(owner.to_string()))
            .ok_or(ApiError::Unauthorized)
    }
}
