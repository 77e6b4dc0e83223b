//! Mapping from domain errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hirelink_core::error::HirelinkError;
use serde_json::json;
use tracing::error;

/// Wrapper carrying a domain error out of a handler.
#[derive(Debug)]
pub struct ApiError(pub HirelinkError);

impl From<HirelinkError> for ApiError {
    fn from(err: HirelinkError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            HirelinkError::InvalidCredentials
            | HirelinkError::AuthenticationRequired
            | HirelinkError::SessionExpired => StatusCode::UNAUTHORIZED,
            HirelinkError::InsufficientPermissions { .. } => StatusCode::FORBIDDEN,
            HirelinkError::NotFound { .. } => StatusCode::NOT_FOUND,
            HirelinkError::AlreadyExists { .. } | HirelinkError::InvalidTransition { .. } => {
                StatusCode::CONFLICT
            }
            HirelinkError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            HirelinkError::Database(_) | HirelinkError::Crypto(_) | HirelinkError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self.0, "request failed");
            // Do not leak internals to the client.
            return (status, Json(json!({ "error": "internal error" }))).into_response();
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
