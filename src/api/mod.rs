//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/digit/:digit", post(digit_handler))
        .route("/backspace", post(backspace_handler))
        .route("/start", post(start_handler))
        .route("/stop", post(stop_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::{
        tasks::spawn_engine,
        timer::{CountdownController, EntryPolicy, IntervalTickSource},
    };

    fn router() -> Router {
        let controller =
            CountdownController::new(IntervalTickSource::default(), EntryPolicy::Compatible);
        let (engine, _) = spawn_engine(controller);
        create_router(Arc::new(AppState::new(engine, 20554, "127.0.0.1".to_string())))
    }

    async fn call(router: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_digit_entry_over_http() {
        let router = router();
        call(&router, "POST", "/digit/1").await;
        call(&router, "POST", "/digit/3").await;
        let (status, body) = call(&router, "POST", "/digit/0").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "idle");
        assert_eq!(body["timer"]["digits"], serde_json::json!([1, 3, 0]));
        assert_eq!(body["timer"]["display"], "00h 01m 30s");

        let (_, body) = call(&router, "POST", "/backspace").await;
        assert_eq!(body["timer"]["digits"], serde_json::json!([1, 3]));
    }

    #[tokio::test]
    async fn test_out_of_range_digit_is_ignored() {
        let router = router();
        let (status, body) = call(&router, "POST", "/digit/12").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timer"]["digits"], serde_json::json!([]));

        let (status, _) = call(&router, "POST", "/digit/x").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_and_stop_over_http() {
        let router = router();
        call(&router, "POST", "/digit/5").await;

        let (_, body) = call(&router, "POST", "/start").await;
        assert_eq!(body["status"], "running");
        assert_eq!(body["timer"]["is_running"], true);

        let (_, body) = call(&router, "POST", "/stop").await;
        assert_eq!(body["status"], "idle");
        assert_eq!(body["timer"]["digits"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_status_reports_last_action() {
        let router = router();
        call(&router, "POST", "/digit/7").await;

        let (status, body) = call(&router, "GET", "/status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["last_action"], "digit");
        assert_eq!(body["port"], 20554);
        assert_eq!(body["timer"]["digits"], serde_json::json!([7]));
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = call(&router(), "GET", "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
