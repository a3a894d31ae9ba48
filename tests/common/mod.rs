// tests/common/mod.rs

//! Shared test utilities for driving the recipe API in-process.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use recipe_box::server::{create_router, AppState, SharedState};
use recipe_box::store::{default_seed, DeletePolicy, RecipeStore, SequentialIds};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Response pieces the tests inspect
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Parsed JSON body, `Value::Null` when the body is empty
    pub body: Value,
    pub raw_len: usize,
}

/// State with the default seed and sequential ids ("1", "2", ...)
pub fn seeded_state() -> SharedState {
    state_with_policy(DeletePolicy::Idempotent)
}

pub fn state_with_policy(policy: DeletePolicy) -> SharedState {
    let store = RecipeStore::seeded(Box::new(SequentialIds::new()), default_seed())
        .unwrap()
        .with_delete_policy(policy);
    Arc::new(AppState::new(store))
}

pub fn app(state: &SharedState) -> Router {
    create_router(Arc::clone(state), true)
}

/// Send one request through the router
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    send_request(app, request).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    TestResponse {
        status,
        headers,
        body,
        raw_len: bytes.len(),
    }
}

/// Keys of a JSON object, sorted
pub fn sorted_keys(value: &Value) -> Vec<String> {
    let mut keys: Vec<String> = value.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    keys
}
