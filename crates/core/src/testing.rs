//! In-memory store for service and API tests.
//!
//! Implements every store port over `tokio` locks, with the same uniqueness
//! and conditional-write rules as the PostgreSQL repositories.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracker_shared::types::{BranchId, ExpenseId, UserId};

use crate::auth::User;
use crate::branch::Branch;
use crate::dashboard::{ExpenseTotals, StatsWindow, tally};
use crate::expense::{Expense, ExpenseFilter, ExpenseStatus};
use crate::store::{BranchStore, ExpenseStore, StoreError, Stores, UserStore};

/// Volatile store holding users, branches and expenses.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<UserId, User>>,
    branches: RwLock<HashMap<BranchId, Branch>>,
    expenses: RwLock<HashMap<ExpenseId, Expense>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a shared store as the full set of ports.
    #[must_use]
    pub fn stores(self: Arc<Self>) -> Stores {
        Stores {
            users: self.clone(),
            branches: self.clone(),
            expenses: self,
        }
    }

    /// Marks a user inactive.
    pub async fn deactivate_user(&self, id: UserId) {
        if let Some(user) = self.users.write().await.get_mut(&id) {
            user.is_active = false;
        }
    }

    /// Overwrites an expense regardless of its status.
    ///
    /// Lets tests age submissions or stage decided expenses.
    pub async fn put_expense(&self, expense: Expense) {
        self.expenses.write().await.insert(expense.id, expense);
    }
}

fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (chrono::DateTime<chrono::Utc>, uuid::Uuid)) {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_employee_id(&self, employee_id: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.employee_id == employee_id)
            .cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        for existing in users.values() {
            if existing.username == user.username {
                return Err(StoreError::Duplicate("username".to_string()));
            }
            if existing.email == user.email {
                return Err(StoreError::Duplicate("email".to_string()));
            }
            if existing.employee_id == user.employee_id {
                return Err(StoreError::Duplicate("employeeId".to_string()));
            }
        }
        users.insert(user.id, user.clone());
        Ok(())
    }
}

#[async_trait]
impl BranchStore for InMemoryStore {
    async fn list(&self) -> Result<Vec<Branch>, StoreError> {
        let mut branches: Vec<Branch> = self.branches.read().await.values().cloned().collect();
        newest_first(&mut branches, |b| (b.created_at, b.id.into_inner()));
        Ok(branches)
    }

    async fn find_by_id(&self, id: BranchId) -> Result<Option<Branch>, StoreError> {
        Ok(self.branches.read().await.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Branch>, StoreError> {
        let needle = name.to_lowercase();
        let branches = self.branches.read().await;
        Ok(branches
            .values()
            .find(|b| b.branch_name.to_lowercase() == needle)
            .cloned())
    }

    async fn insert(&self, branch: &Branch) -> Result<(), StoreError> {
        let mut branches = self.branches.write().await;
        let needle = branch.branch_name.to_lowercase();
        if branches
            .values()
            .any(|b| b.branch_name.to_lowercase() == needle)
        {
            return Err(StoreError::Duplicate("branchName".to_string()));
        }
        branches.insert(branch.id, branch.clone());
        Ok(())
    }

    async fn update(&self, branch: &Branch) -> Result<bool, StoreError> {
        let mut branches = self.branches.write().await;
        let needle = branch.branch_name.to_lowercase();
        if branches
            .values()
            .any(|b| b.id != branch.id && b.branch_name.to_lowercase() == needle)
        {
            return Err(StoreError::Duplicate("branchName".to_string()));
        }
        match branches.get_mut(&branch.id) {
            Some(slot) => {
                *slot = branch.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: BranchId) -> Result<bool, StoreError> {
        Ok(self.branches.write().await.remove(&id).is_some())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.branches.read().await.len() as u64)
    }
}

#[async_trait]
impl ExpenseStore for InMemoryStore {
    async fn list(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>, StoreError> {
        let mut expenses: Vec<Expense> = self
            .expenses
            .read()
            .await
            .values()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        newest_first(&mut expenses, |e| (e.created_at, e.id.into_inner()));
        Ok(expenses)
    }

    async fn find_by_id(&self, id: ExpenseId) -> Result<Option<Expense>, StoreError> {
        Ok(self.expenses.read().await.get(&id).cloned())
    }

    async fn insert(&self, expense: &Expense) -> Result<(), StoreError> {
        self.expenses
            .write()
            .await
            .insert(expense.id, expense.clone());
        Ok(())
    }

    async fn update(&self, expense: &Expense, expected: ExpenseStatus) -> Result<bool, StoreError> {
        let mut expenses = self.expenses.write().await;
        match expenses.get_mut(&expense.id) {
            Some(slot) if slot.status == expected => {
                *slot = expense.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, id: ExpenseId, expected: ExpenseStatus) -> Result<bool, StoreError> {
        let mut expenses = self.expenses.write().await;
        if expenses.get(&id).is_some_and(|e| e.status == expected) {
            expenses.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }

    async fn totals(&self, window: &StatsWindow) -> Result<ExpenseTotals, StoreError> {
        Ok(tally(self.expenses.read().await.values(), window))
    }

    async fn recent(&self, limit: u64) -> Result<Vec<Expense>, StoreError> {
        let mut expenses = ExpenseStore::list(self, &ExpenseFilter::default()).await?;
        expenses.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(expenses)
    }
}
