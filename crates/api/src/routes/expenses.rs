//! Expense routes: CRUD, submission, approval queue and decisions.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    routing::{get, post},
};
use serde::Serialize;
use tracing::info;
use tracker_core::expense::{
    ApprovalRequest, BulkDecisionRequest, BulkOutcome, Expense, ExpenseFilter, ExpenseUpdate,
    NewExpense, PendingExpense, RejectionRequest,
};
use tracker_shared::types::ExpenseId;

use crate::error::ApiResult;
use crate::extractors::{ApiPath, ValidatedJson};
use crate::{AppState, middleware::AuthUser};

/// Creates the expense routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/pending-approval", get(pending_approval))
        .route("/expenses/bulk-approve", post(bulk_approve))
        .route("/expenses/bulk-reject", post(bulk_reject))
        .route(
            "/expenses/{id}",
            get(get_expense).put(update_expense).delete(delete_expense),
        )
        .route("/expenses/{id}/submit", post(submit_expense))
        .route("/expenses/{id}/approve", post(approve_expense))
        .route("/expenses/{id}/reject", post(reject_expense))
}

/// An expense with a confirmation message.
#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    /// Human readable outcome.
    pub message: &'static str,
    /// The affected expense.
    pub expense: Expense,
}

impl ExpenseResponse {
    fn new(message: &'static str, expense: Expense) -> Json<Self> {
        Json(Self { message, expense })
    }
}

/// Summary of a bulk decision.
#[derive(Debug, Serialize)]
pub struct BulkResponse {
    /// Human readable outcome.
    pub message: String,
    /// Per-item results and totals.
    #[serde(flatten)]
    pub outcome: BulkOutcome,
}

/// GET /expenses - List expenses, newest first, with optional filters.
async fn list_expenses(
    State(state): State<AppState>,
    filter: Result<Query<ExpenseFilter>, QueryRejection>,
) -> ApiResult<Json<Vec<Expense>>> {
    let Query(filter) = filter?;
    Ok(Json(state.expenses.list(&filter).await?))
}

/// GET /expenses/pending-approval - Submitted expenses ranked by urgency.
async fn pending_approval(State(state): State<AppState>) -> ApiResult<Json<Vec<PendingExpense>>> {
    Ok(Json(state.expenses.list_pending().await?))
}

/// GET `/expenses/{id}` - Fetch one expense.
async fn get_expense(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ExpenseId>,
) -> ApiResult<Json<Expense>> {
    Ok(Json(state.expenses.get(id).await?))
}

/// POST /expenses - Record an expense.
async fn create_expense(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewExpense>,
) -> ApiResult<(StatusCode, Json<Expense>)> {
    let expense = state.expenses.create(payload).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

/// PUT `/expenses/{id}` - Edit a draft or submitted expense.
async fn update_expense(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ExpenseId>,
    ValidatedJson(payload): ValidatedJson<ExpenseUpdate>,
) -> ApiResult<Json<Expense>> {
    Ok(Json(state.expenses.update(id, payload).await?))
}

/// DELETE `/expenses/{id}` - Remove a draft or submitted expense.
async fn delete_expense(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ExpenseId>,
) -> ApiResult<Json<ExpenseResponse>> {
    let expense = state.expenses.delete(id).await?;
    Ok(ExpenseResponse::new("Expense deleted successfully", expense))
}

/// POST `/expenses/{id}/submit` - Send a draft for approval.
async fn submit_expense(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ExpenseId>,
) -> ApiResult<Json<ExpenseResponse>> {
    let expense = state.expenses.submit(id).await?;
    Ok(ExpenseResponse::new("Expense submitted successfully", expense))
}

/// POST `/expenses/{id}/approve` - Approve, optionally with a new amount.
async fn approve_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<ExpenseId>,
    ValidatedJson(payload): ValidatedJson<ApprovalRequest>,
) -> ApiResult<Json<ExpenseResponse>> {
    let expense = state.expenses.approve(id, auth.username(), payload).await?;
    Ok(ExpenseResponse::new("Expense approved successfully", expense))
}

/// POST `/expenses/{id}/reject` - Reject with a reason.
async fn reject_expense(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ExpenseId>,
    ValidatedJson(payload): ValidatedJson<RejectionRequest>,
) -> ApiResult<Json<ExpenseResponse>> {
    let expense = state.expenses.reject(id, payload).await?;
    Ok(ExpenseResponse::new("Expense rejected successfully", expense))
}

/// POST /expenses/bulk-approve - Approve several expenses independently.
async fn bulk_approve(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<BulkDecisionRequest>,
) -> Json<BulkResponse> {
    let outcome = state
        .expenses
        .bulk_approve(&payload.ids, auth.username(), &payload.comments)
        .await;
    info!(user_id = %auth.user_id(), succeeded = outcome.succeeded, "Bulk approve request");
    Json(BulkResponse {
        message: format!("{} of {} expenses approved", outcome.succeeded, outcome.results.len()),
        outcome,
    })
}

/// POST /expenses/bulk-reject - Reject several expenses independently.
async fn bulk_reject(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<BulkDecisionRequest>,
) -> Json<BulkResponse> {
    let outcome = state.expenses.bulk_reject(&payload.ids, &payload.comments).await;
    info!(user_id = %auth.user_id(), succeeded = outcome.succeeded, "Bulk reject request");
    Json(BulkResponse {
        message: format!("{} of {} expenses rejected", outcome.succeeded, outcome.results.len()),
        outcome,
    })
}

#[cfg(test)]
#[path = "expenses_tests.rs"]
mod tests;
