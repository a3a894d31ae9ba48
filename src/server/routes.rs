// src/server/routes.rs
//! Axum router configuration for the recipe service
//!
//! - `/recipes` - list and create
//! - `/recipes/:id` - get, update, delete
//! - `/health` - liveness and collection size
//! - `/metrics` - Prometheus counters

use crate::server::handlers::recipes;
use crate::server::SharedState;
use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub recipes: usize,
    pub uptime_secs: u64,
}

/// Create the application router
pub fn create_router(state: SharedState, enable_cors: bool) -> Router {
    let router = Router::new()
        .route(
            "/recipes",
            get(recipes::list_recipes).post(recipes::create_recipe),
        )
        .route(
            "/recipes/:id",
            get(recipes::get_recipe)
                .put(recipes::update_recipe)
                .delete(recipes::delete_recipe),
        )
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if enable_cors {
        // Permissive: the API carries no credentials
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        router.layer(cors)
    } else {
        router
    }
}

/// Health check endpoint
async fn health_check(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        recipes: state.store.len(),
        uptime_secs: state.metrics.uptime().as_secs(),
    })
}

/// Metrics endpoint (Prometheus format)
async fn metrics_handler(State(state): State<SharedState>) -> String {
    state.metrics.snapshot().to_prometheus(state.store.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::AppState;
    use crate::store::{default_seed, RecipeStore, SequentialIds};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let store = RecipeStore::seeded(Box::new(SequentialIds::new()), default_seed()).unwrap();
        create_router(Arc::new(AppState::new(store)), true)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["recipes"], 2);
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let response = test_app()
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("recipe_box_recipes 2"));
    }

    #[tokio::test]
    async fn test_get_recipe_by_id() {
        let response = test_app()
            .oneshot(Request::builder().uri("/recipes/2").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["id"], "2");
        assert_eq!(body["name"], "milkshake");
    }

    #[tokio::test]
    async fn test_get_unknown_recipe() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/recipes/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["type"], "urn:recipe-box:error:not_found");
        assert_eq!(body["instance"], "/recipes/nope");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let response = test_app()
            .oneshot(Request::builder().uri("/cookbooks").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
