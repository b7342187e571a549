//! Expense status transitions.
//!
//! Pure rules: every function inspects the current status and either returns
//! the action to apply or the reason the transition is refused.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::error::ExpenseError;
use super::types::{Expense, ExpenseStatus, positive_amount};

/// A validated status change with the data it records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleAction {
    /// Send a draft for approval.
    Submit {
        /// The new status after submission.
        new_status: ExpenseStatus,
        /// When the expense entered the queue.
        submitted_at: DateTime<Utc>,
    },
    /// Accept a submitted expense.
    Approve {
        /// The new status after approval.
        new_status: ExpenseStatus,
        /// Who approved it.
        approver_name: String,
        /// When it was approved.
        approved_at: DateTime<Utc>,
        /// Approver's comments.
        approval_notes: Option<String>,
        /// Amount override, if any.
        approved_amount: Option<Decimal>,
    },
    /// Decline a submitted expense.
    Reject {
        /// The new status after rejection.
        new_status: ExpenseStatus,
        /// Why it was declined.
        rejection_reason: String,
    },
}

impl LifecycleAction {
    /// Returns the new status resulting from this action.
    #[must_use]
    pub const fn new_status(&self) -> ExpenseStatus {
        match self {
            Self::Submit { new_status, .. }
            | Self::Approve { new_status, .. }
            | Self::Reject { new_status, .. } => *new_status,
        }
    }

    /// Writes the action onto an expense.
    pub fn apply(self, expense: &mut Expense, now: DateTime<Utc>) {
        match self {
            Self::Submit {
                new_status,
                submitted_at,
            } => {
                expense.status = new_status;
                expense.submitted_date = submitted_at;
            }
            Self::Approve {
                new_status,
                approver_name,
                approved_at,
                approval_notes,
                approved_amount,
            } => {
                expense.status = new_status;
                expense.approver_name = Some(approver_name);
                expense.approved_date = Some(approved_at);
                expense.approval_notes = approval_notes;
                if let Some(amount) = approved_amount {
                    expense.amount = amount;
                }
            }
            Self::Reject {
                new_status,
                rejection_reason,
            } => {
                expense.status = new_status;
                expense.rejection_reason = Some(rejection_reason);
            }
        }
        expense.updated_at = now;
    }
}

/// Stateless transition rules for the expense lifecycle.
pub struct ExpenseLifecycle;

impl ExpenseLifecycle {
    /// Submit a draft for approval.
    pub fn submit(current: ExpenseStatus) -> Result<LifecycleAction, ExpenseError> {
        if !Self::is_valid_transition(current, ExpenseStatus::Submitted) {
            return Err(ExpenseError::InvalidTransition {
                from: current,
                to: ExpenseStatus::Submitted,
            });
        }

        Ok(LifecycleAction::Submit {
            new_status: ExpenseStatus::Submitted,
            submitted_at: Utc::now(),
        })
    }

    /// Approve a submitted expense.
    ///
    /// # Errors
    /// * `NotPendingApproval` unless the expense is submitted
    /// * `Validation` if the override amount breaks the amount rules
    pub fn approve(
        current: ExpenseStatus,
        approver_name: &str,
        approval_notes: Option<String>,
        approved_amount: Option<Decimal>,
    ) -> Result<LifecycleAction, ExpenseError> {
        if !Self::is_valid_transition(current, ExpenseStatus::Approved) {
            return Err(ExpenseError::NotPendingApproval(current));
        }
        if let Some(amount) = &approved_amount {
            positive_amount(amount).map_err(|e| {
                ExpenseError::Validation(
                    e.message.map_or_else(|| e.code.to_string(), |m| m.to_string()),
                )
            })?;
        }

        Ok(LifecycleAction::Approve {
            new_status: ExpenseStatus::Approved,
            approver_name: approver_name.to_string(),
            approved_at: Utc::now(),
            approval_notes: approval_notes.filter(|n| !n.trim().is_empty()),
            approved_amount,
        })
    }

    /// Reject a submitted expense. A reason is required.
    pub fn reject(
        current: ExpenseStatus,
        rejection_reason: String,
    ) -> Result<LifecycleAction, ExpenseError> {
        if rejection_reason.trim().is_empty() {
            return Err(ExpenseError::RejectionReasonRequired);
        }
        if !Self::is_valid_transition(current, ExpenseStatus::Rejected) {
            return Err(ExpenseError::NotPendingApproval(current));
        }

        Ok(LifecycleAction::Reject {
            new_status: ExpenseStatus::Rejected,
            rejection_reason,
        })
    }

    /// Checks that the expense may still be edited or deleted.
    pub fn ensure_editable(current: ExpenseStatus) -> Result<(), ExpenseError> {
        if current.is_editable() {
            Ok(())
        } else {
            Err(ExpenseError::NotEditable(current))
        }
    }

    /// Draft goes to Submitted, Submitted goes to Approved or Rejected.
    pub(crate) fn is_valid_transition(from: ExpenseStatus, to: ExpenseStatus) -> bool {
        matches!(
            (from, to),
            (ExpenseStatus::Draft, ExpenseStatus::Submitted)
                | (
                    ExpenseStatus::Submitted,
                    ExpenseStatus::Approved | ExpenseStatus::Rejected
                )
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_submit_from_draft() {
        let action = ExpenseLifecycle::submit(ExpenseStatus::Draft).unwrap();
        assert_eq!(action.new_status(), ExpenseStatus::Submitted);
    }

    #[test]
    fn test_submit_twice_fails() {
        let result = ExpenseLifecycle::submit(ExpenseStatus::Submitted);
        assert!(matches!(
            result,
            Err(ExpenseError::InvalidTransition {
                from: ExpenseStatus::Submitted,
                to: ExpenseStatus::Submitted
            })
        ));
    }

    #[test]
    fn test_approve_records_override() {
        let action = ExpenseLifecycle::approve(
            ExpenseStatus::Submitted,
            "manager",
            Some("Looks fine".to_string()),
            Some(dec!(11000)),
        )
        .unwrap();

        let LifecycleAction::Approve {
            approver_name,
            approval_notes,
            approved_amount,
            ..
        } = action
        else {
            panic!("expected approve action");
        };
        assert_eq!(approver_name, "manager");
        assert_eq!(approval_notes.as_deref(), Some("Looks fine"));
        assert_eq!(approved_amount, Some(dec!(11000)));
    }

    #[test]
    fn test_approve_drops_blank_notes() {
        let action =
            ExpenseLifecycle::approve(ExpenseStatus::Submitted, "manager", Some("  ".into()), None)
                .unwrap();
        assert!(matches!(
            action,
            LifecycleAction::Approve {
                approval_notes: None,
                ..
            }
        ));
    }

    #[test]
    fn test_approve_rejects_non_positive_override() {
        let result =
            ExpenseLifecycle::approve(ExpenseStatus::Submitted, "manager", None, Some(dec!(0)));
        assert!(matches!(result, Err(ExpenseError::Validation(_))));
    }

    #[test]
    fn test_approve_rejects_override_outside_column() {
        for amount in [dec!(0.001), dec!(10000000000)] {
            let result = ExpenseLifecycle::approve(
                ExpenseStatus::Submitted,
                "manager",
                None,
                Some(amount),
            );
            assert!(matches!(result, Err(ExpenseError::Validation(_))), "{amount}");
        }
    }

    #[test]
    fn test_approve_only_from_submitted() {
        for status in [
            ExpenseStatus::Draft,
            ExpenseStatus::Approved,
            ExpenseStatus::Rejected,
        ] {
            let result = ExpenseLifecycle::approve(status, "manager", None, None);
            assert!(matches!(result, Err(ExpenseError::NotPendingApproval(s)) if s == status));
        }
    }

    #[test]
    fn test_reject_requires_reason() {
        let result = ExpenseLifecycle::reject(ExpenseStatus::Submitted, "   ".to_string());
        assert!(matches!(result, Err(ExpenseError::RejectionReasonRequired)));
    }

    #[test]
    fn test_rejected_is_terminal() {
        assert!(ExpenseLifecycle::reject(ExpenseStatus::Rejected, "again".into()).is_err());
        assert!(ExpenseLifecycle::submit(ExpenseStatus::Rejected).is_err());
        assert!(ExpenseLifecycle::ensure_editable(ExpenseStatus::Rejected).is_err());
    }

    #[test]
    fn test_ensure_editable() {
        assert!(ExpenseLifecycle::ensure_editable(ExpenseStatus::Draft).is_ok());
        assert!(ExpenseLifecycle::ensure_editable(ExpenseStatus::Submitted).is_ok());
        assert!(matches!(
            ExpenseLifecycle::ensure_editable(ExpenseStatus::Approved),
            Err(ExpenseError::NotEditable(ExpenseStatus::Approved))
        ));
    }

    #[test]
    fn test_valid_transitions() {
        assert!(ExpenseLifecycle::is_valid_transition(
            ExpenseStatus::Draft,
            ExpenseStatus::Submitted
        ));
        assert!(ExpenseLifecycle::is_valid_transition(
            ExpenseStatus::Submitted,
            ExpenseStatus::Rejected
        ));
        assert!(!ExpenseLifecycle::is_valid_transition(
            ExpenseStatus::Rejected,
            ExpenseStatus::Draft
        ));
        assert!(!ExpenseLifecycle::is_valid_transition(
            ExpenseStatus::Draft,
            ExpenseStatus::Approved
        ));
    }
}
