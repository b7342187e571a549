//! Authentication routes for login and signup.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::post,
};
use tracing::info;
use tracker_shared::auth::{AuthResponse, LoginRequest, SignupRequest};

use crate::AppState;
use crate::error::ApiResult;
use crate::extractors::ValidatedJson;

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/signup", post(signup))
}

/// POST /auth/login - Exchange credentials for a session token.
async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let response = state.auth.login(&payload).await?;
    info!(user_id = %response.user.id, "User logged in");
    Ok(Json(response))
}

/// POST /auth/signup - Register an account and sign it in.
///
/// Validation runs in the service, after the fields are trimmed.
async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let Json(payload) = payload?;
    let response = state.auth.signup(payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
