//! Expense lifecycle management for Tracker.
//!
//! # Modules
//!
//! - `types` - Expense domain types and request payloads
//! - `error` - Expense-specific error types
//! - `lifecycle` - Status transition rules
//! - `urgency` - Aging and urgency of pending expenses
//! - `service` - Store-backed operations

pub mod error;
pub mod lifecycle;
pub mod service;
pub mod types;
pub mod urgency;

#[cfg(test)]
mod lifecycle_props;
#[cfg(test)]
mod urgency_props;

pub use error::ExpenseError;
pub use lifecycle::{ExpenseLifecycle, LifecycleAction};
pub use service::ExpenseService;
pub use types::{
    ApprovalRequest, BulkDecisionRequest, BulkItemResult, BulkOutcome, Expense, ExpenseCategory,
    ExpenseFilter, ExpenseStatus, ExpenseUpdate, NewExpense, PendingExpense, RejectionRequest,
};
pub use urgency::{Urgency, days_waiting};
