//! Error types for the Searchlight CLI.
//!
//! This module defines a unified error enum that covers all error categories
//! in the application: configuration, I/O, embedding requests, HTTP
//! transport, service rejections, and search/normalization errors.
//!
//! A core rule of the error model: an empty result set is never an error.
//! "Zero matches" comes back as `Ok` with no hits; anything the service or
//! the transport rejects becomes an explicit variant below. The two are
//! never collapsed into each other.

use thiserror::Error;

/// Unified error type for the Searchlight CLI.
///
/// All functions in the application return `Result<T, AppError>`.
/// We never panic — errors must be represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Embedding request errors (transport, empty response, bad payload)
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Transport-level HTTP failures (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(String),

    /// The service accepted the connection but rejected the request.
    ///
    /// Carries the HTTP status and the provider's own message so callers
    /// can tell an auth failure from a malformed filter from a dimension
    /// mismatch. Distinct from a valid zero-match response.
    #[error("Service error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Search request construction and response normalization errors
    #[error("Search error: {0}")]
    Search(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_includes_status() {
        let err = AppError::Api {
            status: 403,
            message: "invalid api-key".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("403"));
        assert!(text.contains("invalid api-key"));
    }

    #[test]
    fn test_json_error_maps_to_serialization() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: AppError = parse_err.into();
        assert!(matches!(err, AppError::Serialization(_)));
    }
}
