//! Persistence ports.
//!
//! Services only see these traits. The db crate implements them over
//! PostgreSQL and [`crate::testing::InMemoryStore`] implements them for tests.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracker_shared::types::{BranchId, ExpenseId};

use crate::auth::User;
use crate::branch::Branch;
use crate::dashboard::{ExpenseTotals, StatsWindow};
use crate::expense::{Expense, ExpenseFilter, ExpenseStatus};

/// Errors reported by a store implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A unique constraint on the named field was violated.
    #[error("{0} already exists")]
    Duplicate(String),

    /// The backend failed.
    #[error("store failure: {0}")]
    Backend(String),
}

/// User accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Finds a user by exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Finds a user by email. Emails are stored lower-case.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Finds a user by employee identifier.
    async fn find_by_employee_id(&self, employee_id: &str) -> Result<Option<User>, StoreError>;

    /// Persists a new user.
    async fn insert(&self, user: &User) -> Result<(), StoreError>;
}

/// Branch records.
#[async_trait]
pub trait BranchStore: Send + Sync {
    /// Lists all branches, newest first.
    async fn list(&self) -> Result<Vec<Branch>, StoreError>;

    /// Finds a branch by id.
    async fn find_by_id(&self, id: BranchId) -> Result<Option<Branch>, StoreError>;

    /// Finds a branch by name, ignoring case.
    async fn find_by_name(&self, name: &str) -> Result<Option<Branch>, StoreError>;

    /// Persists a new branch.
    async fn insert(&self, branch: &Branch) -> Result<(), StoreError>;

    /// Replaces a branch. Returns `false` when it no longer exists.
    async fn update(&self, branch: &Branch) -> Result<bool, StoreError>;

    /// Deletes a branch. Returns `false` when it did not exist.
    async fn delete(&self, id: BranchId) -> Result<bool, StoreError>;

    /// Counts all branches.
    async fn count(&self) -> Result<u64, StoreError>;
}

/// Expense records.
///
/// Writes against an existing expense are conditional on its status so two
/// concurrent decisions cannot both succeed.
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Lists expenses matching the filter, newest first.
    async fn list(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>, StoreError>;

    /// Finds an expense by id.
    async fn find_by_id(&self, id: ExpenseId) -> Result<Option<Expense>, StoreError>;

    /// Persists a new expense.
    async fn insert(&self, expense: &Expense) -> Result<(), StoreError>;

    /// Replaces an expense if its stored status still equals `expected`.
    ///
    /// Returns `false` when the expense is gone or its status has changed.
    async fn update(&self, expense: &Expense, expected: ExpenseStatus) -> Result<bool, StoreError>;

    /// Deletes an expense if its stored status still equals `expected`.
    async fn delete(&self, id: ExpenseId, expected: ExpenseStatus) -> Result<bool, StoreError>;

    /// Aggregates counts and sums over every expense, bucketed by `window`.
    async fn totals(&self, window: &StatsWindow) -> Result<ExpenseTotals, StoreError>;

    /// The newest expenses, at most `limit`, in `list` order.
    async fn recent(&self, limit: u64) -> Result<Vec<Expense>, StoreError>;
}

/// Store handles injected into every service.
#[derive(Clone)]
pub struct Stores {
    /// User accounts.
    pub users: Arc<dyn UserStore>,
    /// Branch records.
    pub branches: Arc<dyn BranchStore>,
    /// Expense records.
    pub expenses: Arc<dyn ExpenseStore>,
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}
