//! Dashboard statistics and recent activity.
//!
//! This module provides:
//! - Headline counts and amounts for the landing page
//! - The recent expenses feed

mod calc;
mod service;
pub mod types;

pub use calc::{approval_rate, percent_change, summarize, tally};
pub use service::{DashboardService, RECENT_LIMIT};
pub use types::*;
