//! Property-based tests for urgency classification and queue ranking.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::expense::types::{Expense, ExpenseCategory, ExpenseStatus, PendingExpense};
use crate::expense::urgency::{Urgency, annotate, days_waiting, rank_pending};
use tracker_shared::types::ExpenseId;

/// Strategy for positive amounts with two decimal places.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..5_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_days() -> impl Strategy<Value = i64> {
    0i64..60
}

fn expense(amount: Decimal, submitted_days_ago: i64) -> Expense {
    let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
    let submitted = now - Duration::days(submitted_days_ago);
    Expense {
        id: ExpenseId::new(),
        employee_name: "Priya Sharma".to_string(),
        employee_id: "EMP002".to_string(),
        department: "Marketing".to_string(),
        category: ExpenseCategory::OfficeSupplies,
        amount,
        description: "Stationery".to_string(),
        receipt_url: None,
        status: ExpenseStatus::Submitted,
        submitted_date: submitted,
        approved_date: None,
        approver_name: None,
        approval_notes: None,
        rejection_reason: None,
        created_at: submitted,
        updated_at: submitted,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Anything above 10000 is high regardless of age.
    #[test]
    fn prop_large_amount_is_high(cents in 1_000_001i64..100_000_000i64, days in arb_days()) {
        prop_assert_eq!(Urgency::classify(Decimal::new(cents, 2), days), Urgency::High);
    }

    /// Anything waiting more than three days is high regardless of amount.
    #[test]
    fn prop_old_expense_is_high(amount in arb_amount(), days in 4i64..365) {
        prop_assert_eq!(Urgency::classify(amount, days), Urgency::High);
    }

    /// Small amounts waiting two or three days are medium.
    #[test]
    fn prop_small_amount_mid_age_is_medium(cents in 1i64..=500_000i64, days in 2i64..=3) {
        prop_assert_eq!(Urgency::classify(Decimal::new(cents, 2), days), Urgency::Medium);
    }

    /// Urgency never decreases as an expense ages.
    #[test]
    fn prop_urgency_monotonic_in_days(amount in arb_amount(), days in arb_days(), extra in 0i64..30) {
        prop_assert!(Urgency::classify(amount, days + extra) >= Urgency::classify(amount, days));
    }

    /// Days waiting is never negative and matches whole elapsed days.
    #[test]
    fn prop_days_waiting_floor(minutes in -10_000i64..200_000i64) {
        let now = Utc::now();
        let days = days_waiting(now - Duration::minutes(minutes), now);
        prop_assert!(days >= 0);
        prop_assert_eq!(days, (minutes / (24 * 60)).max(0));
    }

    /// Ranking yields urgency descending, then days waiting descending.
    #[test]
    fn prop_rank_is_sorted(items in prop::collection::vec((arb_amount(), arb_days()), 0..20)) {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let mut pending: Vec<PendingExpense> = items
            .into_iter()
            .map(|(amount, days)| annotate(expense(amount, days), now))
            .collect();
        let before = pending.len();

        rank_pending(&mut pending);

        prop_assert_eq!(pending.len(), before);
        for pair in pending.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.urgency >= b.urgency);
            if a.urgency == b.urgency {
                prop_assert!(a.days_waiting >= b.days_waiting);
            }
        }
    }
}
