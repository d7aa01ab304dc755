//! # Client Error Types
//!
//! Unified error handling for cronhub-client library and CLI operations.

use thiserror::Error;

/// Client operation result type
pub type ClientResult<T> = Result<T, ClientError>;

/// Error types for client operations
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization failed: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Config file parse failed: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    #[error("HTTP error: {status} - {message}")]
    HttpStatus { status: u16, message: String },

    #[error("API error: {code} - {message}")]
    ApiError { code: i64, message: String },

    #[error("Authentication failed: {0}")]
    AuthError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid response: {field} - {reason}")]
    InvalidResponse { field: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ClientError {
    /// Create an application-level error from the backend's response envelope
    pub fn api_error(code: i64, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
        }
    }

    /// Create an error from a non-success HTTP status
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Create an invalid response error for protocol violations
    ///
    /// Use this when a response is missing required structure, e.g. a batched
    /// read that did not return one result per sub-request.
    pub fn invalid_response(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Check if error is recoverable (worth retrying by the caller).
    ///
    /// The client itself never retries; this is a classification hint for
    /// consumers that implement their own retry policy.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            ClientError::HttpError(e) => e.is_timeout() || e.is_connect(),
            ClientError::HttpStatus { status, .. } => *status >= 500,
            // Protocol violations are not recoverable - the server is broken
            ClientError::InvalidResponse { .. } => false,
            _ => false,
        }
    }
}
