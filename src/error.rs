//! Error types for whisperbox.

use thiserror::Error;

/// Common error type for whisperbox.
#[derive(Error, Debug)]
pub enum WhisperError {
    /// Database error.
    ///
    /// This is a generic database error that wraps errors from any database backend.
    /// Database errors from sqlx are automatically converted.
    #[error("database error: {0}")]
    Database(String),

    /// Database connection error.
    #[error("database connection error: {0}")]
    DatabaseConnection(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Action refused for the target (e.g. mailbox not accepting messages).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Uniqueness violation (username or email already registered).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Verification code past its expiry.
    #[error("verification code expired")]
    CodeExpired,

    /// Email delivery error.
    #[error("email error: {0}")]
    Email(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal error that should never surface details to clients.
    #[error("internal error: {0}")]
    Internal(String),
}

// Conversion from sqlx errors
impl From<sqlx::Error> for WhisperError {
    fn from(e: sqlx::Error) -> Self {
        WhisperError::Database(e.to_string())
    }
}

/// Result type alias for whisperbox operations.
pub type Result<T> = std::result::Result<T, WhisperError>;
