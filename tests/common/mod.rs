//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tower::util::ServiceExt;

use energy_optimizer::api::{AppState, router};

/// Seed-device state with generators seeded from 42.
pub fn seeded_state() -> Arc<AppState> {
    Arc::new(AppState::seeded(42))
}

/// Response captured from a single router call.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("body should be JSON")
    }

    pub fn allow_origin(&self) -> Option<&str> {
        self.headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok())
    }
}

/// Sends one request through a fresh router over `state`.
pub async fn call(state: &Arc<AppState>, method: Method, uri: &str, body: &str) -> TestResponse {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = router(Arc::clone(state)).oneshot(req).await.unwrap();

    let status = resp.status();
    let headers = resp.headers().clone();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn get(state: &Arc<AppState>, uri: &str) -> TestResponse {
    call(state, Method::GET, uri, "").await
}

pub async fn post(state: &Arc<AppState>, uri: &str, body: &str) -> TestResponse {
    call(state, Method::POST, uri, body).await
}
