//! Error types for doc-convert
//!
//! This module provides the error handling for the library, including:
//! - Domain-specific error types (Validation, Transport, Config)
//! - HTTP status mapping for the conversion endpoint
//! - A `Result` alias used throughout the crate

use thiserror::Error;

/// Result type alias for doc-convert operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for doc-convert
///
/// This is the primary error type used throughout the library. Each variant includes
/// contextual information to help diagnose issues.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "endpoint.base_url")
        key: Option<String>,
    },

    /// Local pre-flight validation failed; no request was sent
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// HTTP-level failure reported by the conversion endpoint
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Response body did not match the conversion service contract
    #[error("invalid conversion response: {0}")]
    InvalidResponse(String),

    /// Session not found
    #[error("conversion session not found: {0}")]
    SessionNotFound(i64),

    /// Shutdown in progress - not accepting new sessions
    #[error("shutdown in progress: not accepting new conversion sessions")]
    ShuttingDown,

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error (artifact persistence)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Local validation errors
///
/// These are raised before any network traffic. A request that fails validation
/// never reaches the conversion endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// File name was empty
    #[error("file name must not be empty")]
    EmptyFileName,

    /// File name contained a forbidden character
    #[error("file name contains invalid character {found:?}")]
    InvalidFileNameCharacters {
        /// The first forbidden character found in the file name
        found: char,
    },

    /// Target format was empty
    #[error("target format must not be empty")]
    EmptyTargetFormat,

    /// The source format cannot be converted to the requested target
    #[error("cannot convert {source_ext:?} to {target:?}")]
    UnsupportedConversion {
        /// Extension of the source document
        source_ext: String,
        /// Requested target extension
        target: String,
    },
}

/// HTTP-level failures from the conversion endpoint
///
/// A transport failure is terminal for the session: it is never retried, so a
/// permission problem surfaces immediately instead of hiding behind the poll loop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The endpoint rejected the request with 403
    #[error("permission denied by conversion endpoint (HTTP {status})")]
    PermissionDenied {
        /// The HTTP status code returned (always 403)
        status: u16,
    },

    /// The endpoint returned an unexpected non-2xx status
    #[error("unexpected status from conversion endpoint (HTTP {status})")]
    UnexpectedStatus {
        /// The HTTP status code returned
        status: u16,
    },
}

impl TransportError {
    /// Classify a non-success HTTP status into a transport error
    pub fn from_status(status: u16) -> Self {
        if status == 403 {
            TransportError::PermissionDenied { status }
        } else {
            TransportError::UnexpectedStatus { status }
        }
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_maps_403_to_permission_denied() {
        assert_eq!(
            TransportError::from_status(403),
            TransportError::PermissionDenied { status: 403 }
        );
    }

    #[test]
    fn test_from_status_maps_other_statuses_to_unexpected() {
        for status in [400u16, 404, 500, 502, 503] {
            assert_eq!(
                TransportError::from_status(status),
                TransportError::UnexpectedStatus { status },
                "status {} should classify as UnexpectedStatus",
                status
            );
        }
    }

    #[test]
    fn test_error_display_includes_context() {
        let err = Error::Config {
            message: "poll interval must be non-zero".to_string(),
            key: Some("polling.poll_interval".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "configuration error: poll interval must be non-zero"
        );

        let err: Error = ValidationError::EmptyFileName.into();
        assert_eq!(err.to_string(), "validation error: file name must not be empty");
    }
}
