//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Every component error converts into one of these variants before it
/// reaches the HTTP layer.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Uniqueness violation on the named field.
    #[error("{0} already exists")]
    DuplicateField(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operation not allowed in the current state of the resource.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Missing or rejected credentials.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Credentials were presented but are not acceptable.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Unexpected failure (store, hashing, token signing).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::DuplicateField(_) | Self::InvalidState(_) => 400,
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::DuplicateField(_) => "DUPLICATE_FIELD",
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidState(_) => "INVALID_STATE",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the message safe to show to API clients.
    ///
    /// Internal errors never leak their details.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation(msg)
            | Self::NotFound(msg)
            | Self::InvalidState(msg)
            | Self::Unauthorized(msg)
            | Self::Forbidden(msg) => msg.clone(),
            Self::DuplicateField(_) => self.to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
        }
    }
}
