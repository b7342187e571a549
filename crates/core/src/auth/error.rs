//! Authentication error types.

use thiserror::Error;
use tracker_shared::AppError;

use crate::store::StoreError;

/// Errors that can occur during login, signup and token verification.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown user, inactive account or wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Username, email or employee id is already taken.
    #[error("{0} already exists")]
    DuplicateField(String),

    /// Request payload failed validation.
    #[error("{0}")]
    Validation(String),

    /// No bearer token was presented.
    #[error("Access token required")]
    MissingToken,

    /// The token is malformed, forged or expired.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Hashing, signing or store failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::DuplicateField(_) | Self::Validation(_) => 400,
            Self::InvalidCredentials | Self::MissingToken => 401,
            Self::InvalidToken => 403,
            Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::DuplicateField(_) => "DUPLICATE_FIELD",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::MissingToken => "MISSING_TOKEN",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(field) => Self::DuplicateField(field),
            StoreError::Backend(msg) => Self::Internal(msg),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::MissingToken => {
                Self::Unauthorized(err.to_string())
            }
            AuthError::InvalidToken => Self::Forbidden(err.to_string()),
            AuthError::DuplicateField(field) => Self::DuplicateField(field),
            AuthError::Validation(msg) => Self::Validation(msg),
            AuthError::Internal(msg) => Self::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::InvalidCredentials.status_code(), 401);
        assert_eq!(AuthError::MissingToken.status_code(), 401);
        assert_eq!(AuthError::InvalidToken.status_code(), 403);
        assert_eq!(AuthError::DuplicateField("email".into()).status_code(), 400);
        assert_eq!(AuthError::Internal(String::new()).status_code(), 500);
    }

    #[test]
    fn test_store_duplicate_maps_to_duplicate_field() {
        let err: AuthError = StoreError::Duplicate("username".into()).into();
        assert!(matches!(err, AuthError::DuplicateField(ref f) if f == "username"));
        assert_eq!(err.to_string(), "username already exists");
    }

    #[test]
    fn test_conversion_keeps_http_semantics() {
        let cases = [
            AuthError::InvalidCredentials,
            AuthError::MissingToken,
            AuthError::InvalidToken,
            AuthError::DuplicateField("email".into()),
            AuthError::Validation("bad".into()),
            AuthError::Internal("boom".into()),
        ];
        for err in cases {
            let status = err.status_code();
            let app: AppError = err.into();
            assert_eq!(app.status_code(), status);
        }
    }
}
