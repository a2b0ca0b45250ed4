//! Error types for the MockMate client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire MockMate client.
///
/// Variants follow the failure taxonomy of the interview service: transport,
/// validation, authorization and application-reported failures, plus the
/// local storage and configuration errors of the client itself.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum MockMateError {
    /// Network/transport failure (connect refused, timeout, broken pipe)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Input rejected before reaching the server (e.g. non-PDF upload)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Session cookie missing or expired
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Server answered with a non-2xx status and an error payload
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Interview channel failure
    #[error("Channel error: {0}")]
    Channel(String),

    /// Interview page opened without a session/job identifier pair
    #[error("Missing interview session identifier")]
    MissingSessionId,

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MockMateError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn channel(message: impl Into<String>) -> Self {
        Self::Channel(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Errors that may go away on their own: transport failures and
    /// server-side 5xx responses.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Channel(_) => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for MockMateError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for MockMateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for MockMateError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for MockMateError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, MockMateError>`.
pub type Result<T> = std::result::Result<T, MockMateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = MockMateError::api(500, "Gemini API not configured");
        assert_eq!(err.to_string(), "API error (500): Gemini API not configured");
        assert!(err.is_transient());
    }

    #[test]
    fn test_client_errors_are_not_transient() {
        assert!(!MockMateError::api(400, "bad request").is_transient());
        assert!(!MockMateError::validation("Please upload a PDF file").is_transient());
        assert!(MockMateError::transport("connection refused").is_transient());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: MockMateError = io.into();
        assert!(matches!(err, MockMateError::Io { .. }));
    }

    #[test]
    fn test_error_is_a_boxable_std_error() {
        // The CLI wraps it with `?` into its own error type.
        fn assert_boxable<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
        let err = MockMateError::validation("Please provide an answer");
        assert_boxable(&err);
        let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(err);
        assert_eq!(boxed.to_string(), "Validation error: Please provide an answer");
    }
}
