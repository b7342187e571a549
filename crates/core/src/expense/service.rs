//! Expense lifecycle manager.
//!
//! Loads expenses through the [`ExpenseStore`] port, applies the
//! [`ExpenseLifecycle`] rules and writes back with a compare-and-set on the
//! status that was read.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::{StreamExt, stream};
use tracing::{debug, info, warn};
use tracker_shared::AppError;
use tracker_shared::types::ExpenseId;
use tracker_shared::validation::describe_errors;
use validator::Validate;

use super::error::ExpenseError;
use super::lifecycle::ExpenseLifecycle;
use super::types::{
    ApprovalRequest, BulkItemResult, BulkOutcome, Expense, ExpenseFilter, ExpenseStatus,
    ExpenseUpdate, NewExpense, PendingExpense, RejectionRequest,
};
use super::urgency::{annotate, rank_pending};
use crate::store::ExpenseStore;

const DEFAULT_DEPARTMENT: &str = "General";

/// Decisions in flight at once during a bulk request.
const BULK_CONCURRENCY: usize = 4;

/// Creates, edits and decides expenses.
#[derive(Clone)]
pub struct ExpenseService {
    expenses: Arc<dyn ExpenseStore>,
}

impl ExpenseService {
    /// Creates a new expense service.
    #[must_use]
    pub fn new(expenses: Arc<dyn ExpenseStore>) -> Self {
        Self { expenses }
    }

    /// Records a new expense, submitted unless `save_as_draft` is set.
    pub async fn create(&self, input: NewExpense) -> Result<Expense, ExpenseError> {
        validate(&input)?;

        let now = Utc::now();
        let department = input
            .department
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| DEFAULT_DEPARTMENT.to_string());
        let status = if input.save_as_draft {
            ExpenseStatus::Draft
        } else {
            ExpenseStatus::Submitted
        };

        let expense = Expense {
            id: ExpenseId::new(),
            employee_name: input.employee_name.trim().to_string(),
            employee_id: input.employee_id.trim().to_string(),
            department,
            category: input.category,
            amount: input.amount,
            description: input.description.trim().to_string(),
            receipt_url: input.receipt_url.filter(|u| !u.trim().is_empty()),
            status,
            submitted_date: now,
            approved_date: None,
            approver_name: None,
            approval_notes: None,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
        };

        self.expenses.insert(&expense).await?;
        info!(expense_id = %expense.id, status = %expense.status, amount = %expense.amount, "Expense created");
        Ok(expense)
    }

    /// Fetches one expense.
    pub async fn get(&self, id: ExpenseId) -> Result<Expense, ExpenseError> {
        self.expenses
            .find_by_id(id)
            .await?
            .ok_or(ExpenseError::NotFound(id))
    }

    /// Lists expenses, newest first.
    pub async fn list(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>, ExpenseError> {
        Ok(self.expenses.list(filter).await?)
    }

    /// Applies a partial update to a draft or submitted expense.
    pub async fn update(
        &self,
        id: ExpenseId,
        changes: ExpenseUpdate,
    ) -> Result<Expense, ExpenseError> {
        validate(&changes)?;

        let current = self.get(id).await?;
        ExpenseLifecycle::ensure_editable(current.status)?;

        let mut updated = current.clone();
        changes.apply(&mut updated);
        updated.updated_at = Utc::now();

        self.write(&updated, current.status).await?;
        info!(expense_id = %id, "Expense updated");
        Ok(updated)
    }

    /// Deletes a draft or submitted expense and returns what was removed.
    pub async fn delete(&self, id: ExpenseId) -> Result<Expense, ExpenseError> {
        let current = self.get(id).await?;
        ExpenseLifecycle::ensure_editable(current.status)?;

        if !self.expenses.delete(id, current.status).await? {
            warn!(expense_id = %id, "Expense changed before delete");
            return Err(ExpenseError::Conflict(id));
        }
        info!(expense_id = %id, "Expense deleted");
        Ok(current)
    }

    /// Sends a draft for approval.
    pub async fn submit(&self, id: ExpenseId) -> Result<Expense, ExpenseError> {
        let current = self.get(id).await?;
        let action = ExpenseLifecycle::submit(current.status)?;

        let mut updated = current.clone();
        action.apply(&mut updated, Utc::now());

        self.write(&updated, current.status).await?;
        info!(expense_id = %id, "Expense submitted");
        Ok(updated)
    }

    /// Approves a submitted expense, optionally overriding its amount.
    pub async fn approve(
        &self,
        id: ExpenseId,
        approver: &str,
        request: ApprovalRequest,
    ) -> Result<Expense, ExpenseError> {
        validate(&request)?;

        let current = self.get(id).await?;
        let action = ExpenseLifecycle::approve(
            current.status,
            approver,
            Some(request.comments),
            request.approved_amount,
        )?;

        let mut updated = current.clone();
        action.apply(&mut updated, Utc::now());

        self.write(&updated, current.status).await?;
        info!(expense_id = %id, approver = %approver, amount = %updated.amount, "Expense approved");
        Ok(updated)
    }

    /// Rejects a submitted expense with a reason.
    pub async fn reject(
        &self,
        id: ExpenseId,
        request: RejectionRequest,
    ) -> Result<Expense, ExpenseError> {
        validate(&request)?;

        let current = self.get(id).await?;
        let action = ExpenseLifecycle::reject(current.status, request.comments)?;

        let mut updated = current.clone();
        action.apply(&mut updated, Utc::now());

        self.write(&updated, current.status).await?;
        info!(expense_id = %id, "Expense rejected");
        Ok(updated)
    }

    /// Returns the approval queue ranked by urgency.
    pub async fn list_pending(&self) -> Result<Vec<PendingExpense>, ExpenseError> {
        self.list_pending_at(Utc::now()).await
    }

    /// Returns the approval queue as seen at `now`.
    pub async fn list_pending_at(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<PendingExpense>, ExpenseError> {
        let submitted = self
            .expenses
            .list(&ExpenseFilter::by_status(ExpenseStatus::Submitted))
            .await?;

        let mut pending: Vec<PendingExpense> =
            submitted.into_iter().map(|e| annotate(e, now)).collect();
        rank_pending(&mut pending);
        debug!(count = pending.len(), "Pending expenses ranked");
        Ok(pending)
    }

    /// Approves several expenses concurrently. Each item succeeds or fails on
    /// its own. Repeated ids are decided once.
    pub async fn bulk_approve(&self, ids: &[ExpenseId], approver: &str, comments: &str) -> BulkOutcome {
        let outcomes = stream::iter(unique_ids(ids))
            .map(|id| async move {
                let request = ApprovalRequest {
                    comments: comments.to_string(),
                    approved_amount: None,
                };
                (id, self.approve(id, approver, request).await)
            })
            .buffered(BULK_CONCURRENCY)
            .collect()
            .await;

        let outcome = collect_outcome(outcomes);
        info!(succeeded = outcome.succeeded, failed = outcome.failed, approver = %approver, "Bulk approval finished");
        outcome
    }

    /// Rejects several expenses concurrently. Each item succeeds or fails on
    /// its own. Repeated ids are decided once.
    pub async fn bulk_reject(&self, ids: &[ExpenseId], comments: &str) -> BulkOutcome {
        let outcomes = stream::iter(unique_ids(ids))
            .map(|id| async move {
                let request = RejectionRequest {
                    comments: comments.to_string(),
                };
                (id, self.reject(id, request).await)
            })
            .buffered(BULK_CONCURRENCY)
            .collect()
            .await;

        let outcome = collect_outcome(outcomes);
        info!(succeeded = outcome.succeeded, failed = outcome.failed, "Bulk rejection finished");
        outcome
    }

    async fn write(&self, expense: &Expense, expected: ExpenseStatus) -> Result<(), ExpenseError> {
        if self.expenses.update(expense, expected).await? {
            Ok(())
        } else {
            warn!(expense_id = %expense.id, expected = %expected, "Expense changed before write");
            Err(ExpenseError::Conflict(expense.id))
        }
    }
}

impl std::fmt::Debug for ExpenseService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpenseService").finish_non_exhaustive()
    }
}

fn validate<T: Validate>(input: &T) -> Result<(), ExpenseError> {
    input
        .validate()
        .map_err(|e| ExpenseError::Validation(describe_errors(&e)))
}

/// Drops repeated ids, keeping first-seen order.
fn unique_ids(ids: &[ExpenseId]) -> Vec<ExpenseId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

fn collect_outcome(outcomes: Vec<(ExpenseId, Result<Expense, ExpenseError>)>) -> BulkOutcome {
    let results = outcomes
        .into_iter()
        .map(|(id, result)| match result {
            Ok(_) => BulkItemResult {
                id,
                success: true,
                error: None,
            },
            Err(err) => BulkItemResult {
                id,
                success: false,
                error: Some(AppError::from(err).public_message()),
            },
        })
        .collect();
    BulkOutcome::from_results(results)
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
