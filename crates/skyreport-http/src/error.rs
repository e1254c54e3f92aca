//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use skyreport_core::ValidationError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Error returned by handlers. Evaluation itself never fails, so the only
/// failures a client sees are rejected inputs.
#[derive(Debug)]
pub struct HttpError(pub ValidationError);

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        tracing::debug!("Rejected request: {}", self.0);
        let body = ApiError::new("BAD_REQUEST", self.0.to_string());
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

impl From<ValidationError> for HttpError {
    fn from(e: ValidationError) -> Self {
        HttpError(e)
    }
}
