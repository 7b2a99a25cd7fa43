use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::db::StorageError;

/// API failures, each rendered as a structured payload with a stable
/// `error` code. Storage detail goes to the log, never to the caller.
pub enum ApiError {
    NotFound,
    MissingConfirmation,
    Storage(StorageError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::MissingConfirmation => {
                (StatusCode::BAD_REQUEST, "missing_confirmation_header")
            }
            ApiError::Storage(err) => {
                tracing::error!("storage failure: {:?}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error")
            }
        };
        (status, Json(json!({ "error": code }))).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
