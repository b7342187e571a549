//! Repository implementations of the core store ports.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod branch;
pub mod expense;
pub mod user;

pub use branch::BranchRepository;
pub use expense::ExpenseRepository;
pub use user::UserRepository;

use sea_orm::{DbErr, SqlErr};
use tracing::error;
use tracker_core::StoreError;

/// Unique constraints and the field each one guards.
const UNIQUE_CONSTRAINTS: [(&str, &str); 4] = [
    ("uq_users_username", "username"),
    ("uq_users_email", "email"),
    ("uq_users_employee_id", "employeeId"),
    ("uq_branches_branch_name", "branchName"),
];

/// Maps a database error onto the store error taxonomy.
pub(crate) fn store_err(err: DbErr) -> StoreError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
        return StoreError::Duplicate(duplicate_field(&detail).to_string());
    }
    error!(error = %err, "Database error");
    StoreError::Backend(err.to_string())
}

fn duplicate_field(detail: &str) -> &'static str {
    UNIQUE_CONSTRAINTS
        .iter()
        .find(|(constraint, _)| detail.contains(constraint))
        .map_or("record", |(_, field)| field)
}
