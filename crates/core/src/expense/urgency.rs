//! Aging and urgency of expenses waiting for approval.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::types::{Expense, PendingExpense};

/// Amount above which an expense is always high urgency.
const HIGH_AMOUNT: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);
/// Amount above which an expense is at least medium urgency.
const MEDIUM_AMOUNT: Decimal = Decimal::from_parts(5_000, 0, 0, false, 0);
/// Days waiting above which an expense is high urgency.
const HIGH_DAYS: i64 = 3;
/// Days waiting above which an expense is at least medium urgency.
const MEDIUM_DAYS: i64 = 1;

/// Review priority of a pending expense. Ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    /// Small and recent.
    Low,
    /// Mid-sized or waiting more than a day.
    Medium,
    /// Large or waiting more than three days.
    High,
}

impl Urgency {
    /// Classifies an expense by amount and time in the queue.
    #[must_use]
    pub fn classify(amount: Decimal, days_waiting: i64) -> Self {
        if amount > HIGH_AMOUNT || days_waiting > HIGH_DAYS {
            Self::High
        } else if amount > MEDIUM_AMOUNT || days_waiting > MEDIUM_DAYS {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Returns the string representation of the urgency.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whole days elapsed since submission, never negative.
#[must_use]
pub fn days_waiting(submitted: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - submitted).num_days().max(0)
}

/// Annotates a submitted expense for the approval queue.
#[must_use]
pub fn annotate(expense: Expense, now: DateTime<Utc>) -> PendingExpense {
    let days = days_waiting(expense.submitted_date, now);
    let urgency = Urgency::classify(expense.amount, days);
    PendingExpense {
        expense,
        days_waiting: days,
        urgency,
    }
}

/// Orders the queue by urgency, then by days waiting, both descending.
///
/// The sort is stable: ties keep their incoming order.
pub fn rank_pending(pending: &mut [PendingExpense]) {
    pending.sort_by(|a, b| {
        b.urgency
            .cmp(&a.urgency)
            .then_with(|| b.days_waiting.cmp(&a.days_waiting))
    });
}
