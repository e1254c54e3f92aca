//! Error types shared across Sky Report crates.
//!
//! - [`ValidationError`]: malformed requests, rejected before any core logic runs
//! - [`NetworkError`]: upstream transport and status failures
//! - [`ConfigError`]: unreadable or invalid configuration

use thiserror::Error;

/// Request validation errors, raised before any core logic runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Missing required parameters: {0}")]
    MissingParameter(String),

    #[error("Invalid {0}")]
    InvalidNumber(String),

    #[error("Latitude must be between -90 and 90, got {0}")]
    Latitude(f64),

    #[error("Longitude must be between -180 and 180, got {0}")]
    Longitude(f64),

    #[error("Invalid time format. Use ISO 8601 (RFC3339) format: {0}")]
    InvalidTime(String),

    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}
