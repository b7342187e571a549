//! Property-based tests for expense lifecycle transitions.

use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::expense::error::ExpenseError;
use crate::expense::lifecycle::{ExpenseLifecycle, LifecycleAction};
use crate::expense::types::ExpenseStatus;

fn arb_status() -> impl Strategy<Value = ExpenseStatus> {
    prop_oneof![
        Just(ExpenseStatus::Draft),
        Just(ExpenseStatus::Submitted),
        Just(ExpenseStatus::Approved),
        Just(ExpenseStatus::Rejected),
    ]
}

fn arb_reason() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9 ]{0,60}"
}

fn arb_amount() -> impl Strategy<Value = Option<Decimal>> {
    prop_oneof![
        Just(None),
        (1i64..10_000_000i64).prop_map(|c| Some(Decimal::new(c, 2))),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every action the rules produce is a valid transition.
    #[test]
    fn prop_actions_are_valid_transitions(
        status in arb_status(),
        reason in arb_reason(),
        amount in arb_amount(),
    ) {
        let actions = [
            ExpenseLifecycle::submit(status),
            ExpenseLifecycle::approve(status, "manager", None, amount),
            ExpenseLifecycle::reject(status, reason),
        ];
        for action in actions.into_iter().flatten() {
            prop_assert!(ExpenseLifecycle::is_valid_transition(status, action.new_status()));
        }
    }

    /// Terminal statuses refuse every transition and every edit.
    #[test]
    fn prop_terminal_status_is_final(
        terminal in prop_oneof![Just(ExpenseStatus::Approved), Just(ExpenseStatus::Rejected)],
        reason in arb_reason(),
        amount in arb_amount(),
    ) {
        prop_assert!(ExpenseLifecycle::submit(terminal).is_err());
        prop_assert!(ExpenseLifecycle::approve(terminal, "manager", None, amount).is_err());
        prop_assert!(ExpenseLifecycle::reject(terminal, reason).is_err());
        prop_assert!(ExpenseLifecycle::ensure_editable(terminal).is_err());
    }

    /// Decisions are only possible from submitted.
    #[test]
    fn prop_decisions_need_submitted(status in arb_status(), reason in arb_reason()) {
        let approved = ExpenseLifecycle::approve(status, "manager", None, None);
        let rejected = ExpenseLifecycle::reject(status, reason);
        if status == ExpenseStatus::Submitted {
            prop_assert!(approved.is_ok());
            prop_assert!(rejected.is_ok());
        } else {
            prop_assert!(matches!(approved, Err(ExpenseError::NotPendingApproval(_))), "approve from {status}");
            prop_assert!(matches!(rejected, Err(ExpenseError::NotPendingApproval(_))), "reject from {status}");
        }
    }

    /// Approval keeps the override amount exactly.
    #[test]
    fn prop_approval_carries_amount(amount in arb_amount()) {
        let action = ExpenseLifecycle::approve(ExpenseStatus::Submitted, "manager", None, amount).unwrap();
        if let LifecycleAction::Approve { approved_amount, .. } = action {
            prop_assert_eq!(approved_amount, amount);
        } else {
            prop_assert!(false, "Expected Approve action");
        }
    }
}
