//! Store-backed dashboard queries.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::calc::summarize;
use super::types::{DashboardStats, RecentExpense, StatsWindow};
use crate::expense::ExpenseError;
use crate::store::{BranchStore, ExpenseStore};

/// Default size of the recent expenses feed.
pub const RECENT_LIMIT: usize = 10;

/// Reads aggregate figures for the landing page.
#[derive(Clone)]
pub struct DashboardService {
    expenses: Arc<dyn ExpenseStore>,
    branches: Arc<dyn BranchStore>,
}

impl DashboardService {
    /// Creates a new dashboard service.
    #[must_use]
    pub fn new(expenses: Arc<dyn ExpenseStore>, branches: Arc<dyn BranchStore>) -> Self {
        Self { expenses, branches }
    }

    /// Headline statistics as of now.
    pub async fn stats(&self) -> Result<DashboardStats, ExpenseError> {
        self.stats_at(Utc::now()).await
    }

    /// Headline statistics as of `now`.
    pub async fn stats_at(&self, now: DateTime<Utc>) -> Result<DashboardStats, ExpenseError> {
        let totals = self.expenses.totals(&StatsWindow::at(now)).await?;
        let branches = self.branches.count().await?;
        Ok(summarize(&totals, branches))
    }

    /// The newest expenses, at most `limit`.
    pub async fn recent(&self, limit: usize) -> Result<Vec<RecentExpense>, ExpenseError> {
        let limit = u64::try_from(limit).unwrap_or(u64::MAX);
        let expenses = self.expenses.recent(limit).await?;
        Ok(expenses.iter().map(RecentExpense::from).collect())
    }
}

impl std::fmt::Debug for DashboardService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branch::{BranchInput, BranchService};
    use crate::expense::{
        ApprovalRequest, ExpenseCategory, ExpenseService, NewExpense, RejectionRequest,
    };
    use crate::testing::InMemoryStore;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn lunch(amount: Decimal) -> NewExpense {
        NewExpense {
            employee_name: "Arun Patel".to_string(),
            employee_id: "EMP003".to_string(),
            department: None,
            category: ExpenseCategory::Meals,
            amount,
            description: "Team lunch".to_string(),
            receipt_url: None,
            save_as_draft: false,
        }
    }

    fn approval(comments: &str) -> ApprovalRequest {
        ApprovalRequest {
            comments: comments.to_string(),
            approved_amount: None,
        }
    }

    #[tokio::test]
    async fn test_stats_and_recent_over_store() {
        let store = Arc::new(InMemoryStore::new());
        let expenses = ExpenseService::new(store.clone());
        let branches = BranchService::new(store.clone());
        let dashboard = DashboardService::new(store.clone(), store.clone());

        branches
            .create(BranchInput {
                branch_name: "Mumbai Central".to_string(),
                location: "Mumbai".to_string(),
                contact_person: "Rajesh Kumar".to_string(),
            })
            .await
            .unwrap();
        for amount in [dec!(100), dec!(200), dec!(300)] {
            expenses.create(lunch(amount)).await.unwrap();
        }

        let stats = dashboard.stats().await.unwrap();
        assert_eq!(stats.total_expenses, 3);
        assert_eq!(stats.pending_approvals, 3);
        assert_eq!(stats.total_branches, 1);
        assert_eq!(stats.monthly_spend, dec!(0));
        assert_eq!(stats.approval_rate, dec!(0));

        let recent = dashboard.recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(dashboard.recent(RECENT_LIMIT).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_stats_read_store_totals() {
        let store = Arc::new(InMemoryStore::new());
        let expenses = ExpenseService::new(store.clone());
        let dashboard = DashboardService::new(store.clone(), store.clone());

        let first = expenses.create(lunch(dec!(400))).await.unwrap();
        let second = expenses.create(lunch(dec!(100))).await.unwrap();
        expenses
            .approve(first.id, "manager", approval("ok"))
            .await
            .unwrap();
        expenses
            .reject(
                second.id,
                RejectionRequest {
                    comments: "Personal".to_string(),
                },
            )
            .await
            .unwrap();

        let now = Utc::now();
        let totals = store.totals(&StatsWindow::at(now)).await.unwrap();
        assert_eq!(totals.approved, 1);
        assert_eq!(totals.rejected, 1);
        assert_eq!(totals.monthly_spend, dec!(400));

        let stats = dashboard.stats_at(now).await.unwrap();
        assert_eq!(stats, summarize(&totals, 0));
        assert_eq!(stats.approval_rate, dec!(50));
    }
}
