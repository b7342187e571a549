//! Core business logic for Tracker.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Persistence is reached only through the store ports in [`store`].
//!
//! # Modules
//!
//! - `auth` - Password hashing, login, signup and token verification
//! - `branch` - Branch registry
//! - `expense` - Expense lifecycle, urgency and bulk decisions
//! - `dashboard` - Aggregate statistics for the landing page
//! - `store` - Persistence ports implemented by the db crate

pub mod auth;
pub mod branch;
pub mod dashboard;
pub mod expense;
pub mod store;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use store::{StoreError, Stores};
