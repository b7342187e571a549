//! Pure dashboard calculations.

use chrono::{DateTime, Datelike, Months, NaiveDate, TimeZone, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use super::types::{DashboardStats, ExpenseTotals, StatsWindow};
use crate::expense::{Expense, ExpenseStatus};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

impl StatsWindow {
    /// The current and previous calendar months as seen at `now`.
    #[must_use]
    pub fn at(now: DateTime<Utc>) -> Self {
        let this_month = month_start(now);
        let last_month = this_month
            .checked_sub_months(Months::new(1))
            .unwrap_or(this_month);
        Self {
            last_month,
            this_month,
            now,
        }
    }

    fn in_this_month(&self, at: DateTime<Utc>) -> bool {
        at >= self.this_month && at <= self.now
    }

    fn in_last_month(&self, at: DateTime<Utc>) -> bool {
        at >= self.last_month && at < self.this_month
    }
}

/// Folds expenses into totals. Stores without an aggregate query use this.
#[must_use]
pub fn tally<'a>(
    expenses: impl IntoIterator<Item = &'a Expense>,
    window: &StatsWindow,
) -> ExpenseTotals {
    let mut totals = ExpenseTotals::default();

    for expense in expenses {
        totals.total += 1;
        match expense.status {
            ExpenseStatus::Submitted => totals.pending += 1,
            ExpenseStatus::Approved => {
                totals.approved += 1;
                if expense.approved_date.is_some_and(|d| window.in_this_month(d)) {
                    totals.monthly_spend += expense.amount;
                }
            }
            ExpenseStatus::Rejected => totals.rejected += 1,
            ExpenseStatus::Draft => continue,
        }

        if window.in_this_month(expense.submitted_date) {
            totals.submitted_this_month += expense.amount;
        } else if window.in_last_month(expense.submitted_date) {
            totals.submitted_last_month += expense.amount;
        }
    }

    totals
}

/// Builds headline statistics from store totals.
#[must_use]
pub fn summarize(totals: &ExpenseTotals, total_branches: u64) -> DashboardStats {
    DashboardStats {
        total_expenses: totals.total,
        pending_approvals: totals.pending,
        total_branches,
        monthly_spend: totals.monthly_spend,
        expense_growth: percent_change(totals.submitted_this_month, totals.submitted_last_month),
        approval_rate: approval_rate(totals.approved, totals.rejected),
    }
}

/// Percent change from `previous` to `current`, rounded to 1 dp.
///
/// Zero when both are zero, 100 when only `previous` is zero.
#[must_use]
pub fn percent_change(current: Decimal, previous: Decimal) -> Decimal {
    if previous.is_zero() {
        return if current.is_zero() {
            Decimal::ZERO
        } else {
            HUNDRED
        };
    }
    round_one_dp((current - previous) * HUNDRED / previous)
}

/// Approved share of decided expenses as a percentage, rounded to 1 dp.
#[must_use]
pub fn approval_rate(approved: u64, rejected: u64) -> Decimal {
    let decided = approved + rejected;
    if decided == 0 {
        return Decimal::ZERO;
    }
    round_one_dp(Decimal::from(approved) * HUNDRED / Decimal::from(decided))
}

fn round_one_dp(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map_or(now, |naive| Utc.from_utc_datetime(&naive))
}
