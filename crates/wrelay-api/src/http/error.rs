//! Application error type mapping to HTTP status codes.
//!
//! Error bodies are `{"error": "<message>"}`. Internal failures are logged
//! with their cause and reported to the caller only by a generic message.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use wrelay_types::error::RelayError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Missing or malformed request fields (400).
    Validation(String),
    /// Upstream or persistence failure (500).
    Internal(String),
}

impl AppError {
    /// Map a relay error, reporting any non-validation failure as `context`.
    pub fn from_relay(err: RelayError, context: &str) -> Self {
        match err {
            RelayError::Validation(msg) => AppError::Validation(msg),
            other => {
                tracing::error!(error = %other, "{context}");
                AppError::Internal(context.to_string())
            }
        }
    }

    /// Map a body that could not be parsed as JSON to a validation error.
    pub fn from_rejection(rejection: JsonRejection, message: &str) -> Self {
        tracing::debug!(error = %rejection, "Rejected request body");
        AppError::Validation(message.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
