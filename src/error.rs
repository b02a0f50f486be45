//! Error types for travel-auth.

use thiserror::Error;

/// Main error type for session and authentication operations.
#[derive(Error, Debug)]
pub enum AuthError {
    /// A required input field was missing or empty.
    #[error("validation error: {0}")]
    Validation(String),

    /// A mutating operation needs a logged-in user.
    #[error("user is not logged in")]
    NotAuthenticated,

    /// An identity provider rejected the sign-in.
    #[error("provider authentication failed: {0}")]
    Provider(String),

    /// The key-value backend failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal lock was poisoned.
    #[error("internal lock poisoned")]
    LockPoisoned,
}

impl AuthError {
    /// Shorthand for a validation failure.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether the caller supplied bad input, as opposed to an environment failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotAuthenticated)
    }
}

/// Convenience Result type for travel-auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = AuthError::validation("Email and password are required");
        assert!(err.to_string().contains("validation error"));
        assert!(err.to_string().contains("Email and password"));
    }

    #[test]
    fn test_not_authenticated_display() {
        let err = AuthError::NotAuthenticated;
        assert_eq!(err.to_string(), "user is not logged in");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: AuthError = io_err.into();
        assert!(matches!(err, AuthError::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: AuthError = json_err.into();
        assert!(matches!(err, AuthError::Serialization(_)));
    }

    #[test]
    fn test_client_error_classification() {
        assert!(AuthError::validation("x").is_client_error());
        assert!(AuthError::NotAuthenticated.is_client_error());
        assert!(!AuthError::Storage("disk full".into()).is_client_error());
        assert!(!AuthError::LockPoisoned.is_client_error());
    }
}
