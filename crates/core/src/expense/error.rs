//! Expense error types.

use thiserror::Error;
use tracker_shared::AppError;
use tracker_shared::types::ExpenseId;

use super::types::ExpenseStatus;
use crate::store::StoreError;

/// Errors that can occur during expense operations.
#[derive(Debug, Error)]
pub enum ExpenseError {
    /// Expense not found.
    #[error("Expense not found")]
    NotFound(ExpenseId),

    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: ExpenseStatus,
        /// The attempted target status.
        to: ExpenseStatus,
    },

    /// Approve or reject on an expense that is not submitted.
    #[error("Expense is not pending approval")]
    NotPendingApproval(ExpenseStatus),

    /// Update or delete on a decided expense.
    #[error("Cannot modify {0} expense")]
    NotEditable(ExpenseStatus),

    /// The expense changed status between read and write.
    #[error("Expense was modified by another request")]
    Conflict(ExpenseId),

    /// Rejection reason is required but not provided.
    #[error("Rejection reason is required")]
    RejectionReasonRequired,

    /// Request payload failed validation.
    #[error("{0}")]
    Validation(String),

    /// Store failure.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl ExpenseError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. }
            | Self::NotPendingApproval(_)
            | Self::NotEditable(_)
            | Self::Conflict(_)
            | Self::RejectionReasonRequired
            | Self::Validation(_) => 400,

            Self::NotFound(_) => 404,

            Self::Store(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "EXPENSE_NOT_FOUND",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::NotPendingApproval(_) => "NOT_PENDING_APPROVAL",
            Self::NotEditable(_) => "NOT_EDITABLE",
            Self::Conflict(_) => "CONCURRENT_MODIFICATION",
            Self::RejectionReasonRequired => "REJECTION_REASON_REQUIRED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Store(_) => "STORE_ERROR",
        }
    }
}

impl From<ExpenseError> for AppError {
    fn from(err: ExpenseError) -> Self {
        match err {
            ExpenseError::NotFound(_) => Self::NotFound(err.to_string()),
            ExpenseError::InvalidTransition { .. }
            | ExpenseError::NotPendingApproval(_)
            | ExpenseError::NotEditable(_)
            | ExpenseError::Conflict(_) => Self::InvalidState(err.to_string()),
            ExpenseError::RejectionReasonRequired => Self::Validation(err.to_string()),
            ExpenseError::Validation(msg) => Self::Validation(msg),
            ExpenseError::Store(e) => Self::Internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found() {
        let err = ExpenseError::NotFound(ExpenseId::new());
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.to_string(), "Expense not found");
        assert!(matches!(AppError::from(err), AppError::NotFound(_)));
    }

    #[test]
    fn test_not_editable_message() {
        let err = ExpenseError::NotEditable(ExpenseStatus::Approved);
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "NOT_EDITABLE");
        assert_eq!(err.to_string(), "Cannot modify approved expense");
    }

    #[test]
    fn test_state_errors_map_to_invalid_state() {
        let cases = [
            ExpenseError::NotPendingApproval(ExpenseStatus::Approved),
            ExpenseError::NotEditable(ExpenseStatus::Rejected),
            ExpenseError::Conflict(ExpenseId::new()),
            ExpenseError::InvalidTransition {
                from: ExpenseStatus::Approved,
                to: ExpenseStatus::Submitted,
            },
        ];
        for err in cases {
            assert!(matches!(AppError::from(err), AppError::InvalidState(_)));
        }
    }

    #[test]
    fn test_store_error_is_internal() {
        let err = ExpenseError::from(StoreError::Backend("connection reset".into()));
        assert_eq!(err.status_code(), 500);
        let app = AppError::from(err);
        assert_eq!(app.status_code(), 500);
        assert_eq!(app.public_message(), "Internal server error");
    }
}
