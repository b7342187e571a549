//! Dashboard data types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracker_shared::types::ExpenseId;

use crate::expense::{Expense, ExpenseCategory, ExpenseStatus};

/// Headline statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Number of expenses in any status.
    pub total_expenses: u64,
    /// Number of expenses waiting for a decision.
    pub pending_approvals: u64,
    /// Number of registered branches.
    pub total_branches: u64,
    /// Approved amount for the current calendar month.
    pub monthly_spend: Decimal,
    /// Percent change of submitted amounts against last month, 1 dp.
    pub expense_growth: Decimal,
    /// Approved share of decided expenses as a percentage, 1 dp.
    pub approval_rate: Decimal,
}

/// Month boundaries the statistics are bucketed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsWindow {
    /// Start of the previous calendar month.
    pub last_month: DateTime<Utc>,
    /// Start of the current calendar month.
    pub this_month: DateTime<Utc>,
    /// Upper bound for the current month.
    pub now: DateTime<Utc>,
}

/// Counts and sums over every stored expense, as a store reports them.
///
/// Drafts count towards `total` only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseTotals {
    /// Expenses in any status.
    pub total: u64,
    /// Submitted expenses.
    pub pending: u64,
    /// Approved expenses.
    pub approved: u64,
    /// Rejected expenses.
    pub rejected: u64,
    /// Amount approved within `[this_month, now]`.
    pub monthly_spend: Decimal,
    /// Amount submitted within `[this_month, now]`.
    pub submitted_this_month: Decimal,
    /// Amount submitted within `[last_month, this_month)`.
    pub submitted_last_month: Decimal,
}

/// Status as shown in the recent feed. Draft and submitted collapse into
/// `pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecentStatus {
    /// Not decided yet.
    Pending,
    /// Approved.
    Approved,
    /// Rejected.
    Rejected,
}

impl From<ExpenseStatus> for RecentStatus {
    fn from(status: ExpenseStatus) -> Self {
        match status {
            ExpenseStatus::Draft | ExpenseStatus::Submitted => Self::Pending,
            ExpenseStatus::Approved => Self::Approved,
            ExpenseStatus::Rejected => Self::Rejected,
        }
    }
}

/// One line of the recent expenses feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentExpense {
    /// Expense ID.
    pub id: ExpenseId,
    /// Claimant.
    pub employee_name: String,
    /// Current amount.
    pub amount: Decimal,
    /// Category.
    pub category: ExpenseCategory,
    /// Feed status.
    pub status: RecentStatus,
    /// Submission date.
    pub date: DateTime<Utc>,
}

impl From<&Expense> for RecentExpense {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense.id,
            employee_name: expense.employee_name.clone(),
            amount: expense.amount,
            category: expense.category,
            status: expense.status.into(),
            date: expense.submitted_date,
        }
    }
}
