//! Error types for the API layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::VerifyError;
use serde_json::json;
use thiserror::Error;

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// API error types.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or incomplete request (400).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Resource doesn't exist (404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Verification pipeline failure; status depends on the variant.
    #[error(transparent)]
    Verify(#[from] VerifyError),

    /// Anything else (500).
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            ApiError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::Verify(err) => match err {
                VerifyError::MissingInput => {
                    (StatusCode::BAD_REQUEST, "missing_image", err.to_string())
                }
                VerifyError::StorageWrite { .. } => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "storage_error",
                    err.to_string(),
                ),
                VerifyError::Decode { .. } => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "decode_error",
                    err.to_string(),
                ),
                VerifyError::Inference { .. } => {
                    (StatusCode::BAD_GATEWAY, "inference_error", err.to_string())
                }
            },
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone())
            }
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
