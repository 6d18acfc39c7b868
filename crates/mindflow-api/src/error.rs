use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use mindflow_persist::PersistError;
use mindflow_types::ValidationError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Thread not found")]
    ThreadNotFound(String),

    #[error("Thread already exists")]
    ThreadExists(String),

    #[error("Stale write rejected")]
    StaleWrite(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    #[error("Persistence error: {0}")]
    Persist(PersistError),
}

impl From<PersistError> for ApiError {
    fn from(err: PersistError) -> Self {
        match err {
            PersistError::ThreadNotFound(id) => Self::ThreadNotFound(id),
            PersistError::ThreadExists(id) => Self::ThreadExists(id),
            PersistError::StaleWrite { thread_id, .. } => Self::StaleWrite(thread_id),
            PersistError::Validation(e) => Self::BadRequest(e.to_string()),
            other => Self::Persist(other),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::ThreadNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::ThreadExists(_) | ApiError::StaleWrite(_) => {
                (StatusCode::CONFLICT, self.to_string())
            }
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Persist(ref e) => {
                tracing::error!("Persistence error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Storage error".to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
