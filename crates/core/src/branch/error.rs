//! Branch error types.

use thiserror::Error;
use tracker_shared::AppError;
use tracker_shared::types::BranchId;

use crate::store::StoreError;

/// Errors that can occur during branch operations.
#[derive(Debug, Error)]
pub enum BranchError {
    /// Branch not found.
    #[error("Branch not found")]
    NotFound(BranchId),

    /// Another branch already uses this name.
    #[error("Branch name already exists")]
    DuplicateName(String),

    /// Request payload failed validation.
    #[error("{0}")]
    Validation(String),

    /// Store failure.
    #[error("Store error: {0}")]
    Store(StoreError),
}

impl BranchError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::DuplicateName(_) | Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Store(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "BRANCH_NOT_FOUND",
            Self::DuplicateName(_) => "DUPLICATE_BRANCH_NAME",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Store(_) => "STORE_ERROR",
        }
    }
}

impl From<StoreError> for BranchError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(field) => Self::DuplicateName(field),
            StoreError::Backend(_) => Self::Store(err),
        }
    }
}

impl From<BranchError> for AppError {
    fn from(err: BranchError) -> Self {
        match err {
            BranchError::NotFound(_) => Self::NotFound(err.to_string()),
            BranchError::DuplicateName(_) => Self::DuplicateField("Branch name".to_string()),
            BranchError::Validation(msg) => Self::Validation(msg),
            BranchError::Store(e) => Self::Internal(e.to_string()),
        }
    }
}
