//! Branch management routes.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use tracing::info;
use tracker_core::branch::{Branch, BranchInput};
use tracker_shared::types::BranchId;

use crate::error::ApiResult;
use crate::extractors::{ApiPath, ValidatedJson};
use crate::{AppState, middleware::AuthUser};

/// Creates the branch routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/branches", get(list_branches).post(create_branch))
        .route(
            "/branches/{id}",
            get(get_branch).put(update_branch).delete(delete_branch),
        )
}

/// A branch with a confirmation message.
#[derive(Debug, Serialize)]
pub struct BranchResponse {
    /// Human readable outcome.
    pub message: &'static str,
    /// The affected branch.
    pub branch: Branch,
}

/// A bare confirmation message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human readable outcome.
    pub message: &'static str,
}

/// GET /branches - List branches, newest first.
async fn list_branches(State(state): State<AppState>) -> ApiResult<Json<Vec<Branch>>> {
    Ok(Json(state.branches.list().await?))
}

/// GET `/branches/{id}` - Fetch one branch.
async fn get_branch(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<BranchId>,
) -> ApiResult<Json<Branch>> {
    Ok(Json(state.branches.get(id).await?))
}

/// POST /branches - Register a branch.
async fn create_branch(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<BranchInput>,
) -> ApiResult<(StatusCode, Json<BranchResponse>)> {
    let branch = state.branches.create(payload).await?;
    info!(branch_id = %branch.id, user_id = %auth.user_id(), "Branch registered");
    Ok((
        StatusCode::CREATED,
        Json(BranchResponse {
            message: "Branch created successfully",
            branch,
        }),
    ))
}

/// PUT `/branches/{id}` - Replace a branch.
async fn update_branch(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<BranchId>,
    ValidatedJson(payload): ValidatedJson<BranchInput>,
) -> ApiResult<Json<BranchResponse>> {
    let branch = state.branches.update(id, payload).await?;
    Ok(Json(BranchResponse {
        message: "Branch updated successfully",
        branch,
    }))
}

/// DELETE `/branches/{id}` - Remove a branch.
async fn delete_branch(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<BranchId>,
) -> ApiResult<Json<MessageResponse>> {
    state.branches.delete(id).await?;
    Ok(Json(MessageResponse {
        message: "Branch deleted successfully",
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::testing::{TestApp, send};

    #[tokio::test]
    async fn test_requires_token() {
        let app = TestApp::new();
        let (status, body) = send(&app.router, "GET", "/api/branches", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Access token required");

        let (status, body) =
            send(&app.router, "GET", "/api/branches", Some("not-a-jwt"), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "Invalid or expired token");
    }

    #[tokio::test]
    async fn test_branch_crud() {
        let app = TestApp::new();
        let token = app.token();
        let body = json!({
            "branchName": "Mumbai Central",
            "location": "Mumbai, Maharashtra",
            "contactPerson": "Rajesh Kumar"
        });

        let (status, created) =
            send(&app.router, "POST", "/api/branches", Some(&token), Some(body.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["message"], "Branch created successfully");
        let id = created["branch"]["id"].as_str().unwrap().to_string();

        let (status, _) =
            send(&app.router, "POST", "/api/branches", Some(&token), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let update = json!({
            "branchName": "Mumbai Central",
            "location": "Mumbai",
            "contactPerson": "Priya Sharma"
        });
        let uri = format!("/api/branches/{id}");
        let (status, updated) = send(&app.router, "PUT", &uri, Some(&token), Some(update)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["branch"]["contactPerson"], "Priya Sharma");

        let (status, deleted) = send(&app.router, "DELETE", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted["message"], "Branch deleted successfully");

        let (status, missing) = send(&app.router, "GET", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(missing["message"], "Branch not found");
    }

    #[tokio::test]
    async fn test_malformed_id() {
        let app = TestApp::new();
        let token = app.token();
        let (status, body) =
            send(&app.router, "GET", "/api/branches/42", Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }
}
