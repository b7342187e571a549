//! Dashboard routes.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracker_core::dashboard::{DashboardStats, RECENT_LIMIT, RecentExpense};

use crate::AppState;
use crate::error::ApiResult;

/// Largest recent feed a client may ask for.
const MAX_RECENT_LIMIT: usize = 100;

/// Creates the dashboard routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/stats", get(stats))
        .route("/dashboard/recent-expenses", get(recent_expenses))
}

/// Headline figures. Money stays a decimal string, percentages are numbers.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    /// Every stored expense.
    pub total_expenses: u64,
    /// Submitted expenses awaiting a decision.
    pub pending_approvals: u64,
    /// Registered branches.
    pub total_branches: u64,
    /// Approved this month.
    pub monthly_spend: Decimal,
    /// Month over month change in submitted amounts, percent.
    pub expense_growth: f64,
    /// Approved share of decisions, percent.
    pub approval_rate: f64,
}

impl From<DashboardStats> for StatsResponse {
    fn from(stats: DashboardStats) -> Self {
        Self {
            total_expenses: stats.total_expenses,
            pending_approvals: stats.pending_approvals,
            total_branches: stats.total_branches,
            monthly_spend: stats.monthly_spend,
            expense_growth: stats.expense_growth.to_f64().unwrap_or_default(),
            approval_rate: stats.approval_rate.to_f64().unwrap_or_default(),
        }
    }
}

/// Query parameters for the recent feed.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecentQuery {
    /// Number of entries, defaults to ten.
    pub limit: Option<usize>,
}

/// GET /dashboard/stats - Headline figures.
async fn stats(State(state): State<AppState>) -> ApiResult<Json<StatsResponse>> {
    Ok(Json(state.dashboard.stats().await?.into()))
}

/// GET /dashboard/recent-expenses - Newest expenses.
async fn recent_expenses(
    State(state): State<AppState>,
    query: Result<Query<RecentQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<RecentExpense>>> {
    let Query(query) = query?;
    let limit = query.limit.unwrap_or(RECENT_LIMIT).min(MAX_RECENT_LIMIT);
    Ok(Json(state.dashboard.recent(limit).await?))
}
