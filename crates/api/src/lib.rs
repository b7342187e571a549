//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes under `/api`
//! - Bearer token middleware
//! - Request extractors
//! - The JSON error envelope

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracker_core::Stores;
use tracker_core::auth::AuthService;
use tracker_core::branch::BranchService;
use tracker_core::dashboard::DashboardService;
use tracker_core::expense::ExpenseService;
use tracker_shared::JwtService;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Login, signup and token checks.
    pub auth: Arc<AuthService>,
    /// Branch registry.
    pub branches: Arc<BranchService>,
    /// Expense lifecycle.
    pub expenses: Arc<ExpenseService>,
    /// Landing page figures.
    pub dashboard: Arc<DashboardService>,
    /// Message returned by `GET /api/ping`.
    pub ping_message: Arc<str>,
}

impl AppState {
    /// Builds every service over the given stores.
    #[must_use]
    pub fn new(stores: Stores, jwt: JwtService, ping_message: &str) -> Self {
        Self {
            auth: Arc::new(AuthService::new(stores.users, jwt)),
            branches: Arc::new(BranchService::new(stores.branches.clone())),
            expenses: Arc::new(ExpenseService::new(stores.expenses.clone())),
            dashboard: Arc::new(DashboardService::new(stores.expenses, stores.branches)),
            ping_message: Arc::from(ping_message),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
