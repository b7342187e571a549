//! Router harness for route tests.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::AUTHORIZATION, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use tracker_core::testing::InMemoryStore;
use tracker_shared::types::UserId;
use tracker_shared::{JwtConfig, JwtService, UserRole};

use crate::{AppState, create_router};

/// A router over a fresh in-memory store.
pub struct TestApp {
    pub router: Router,
    pub jwt: JwtService,
}

impl TestApp {
    pub fn new() -> Self {
        let jwt = JwtService::new(JwtConfig::default());
        let store = Arc::new(InMemoryStore::new());
        let state = AppState::new(store.stores(), jwt.clone(), "pong");
        Self {
            router: create_router(state),
            jwt,
        }
    }

    /// A valid session token for the manager "barath".
    pub fn token(&self) -> String {
        self.jwt
            .generate_token(UserId::new(), "barath", UserRole::Manager)
            .expect("token should sign")
    }
}

/// Sends one request and decodes the JSON body (`Null` when empty).
pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => request
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
