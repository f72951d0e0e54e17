//! Integration tests for the static asset fallback.
//!
//! Requests that match no API route fall through to a directory service:
//! 1. Directory requests resolve to index.html
//! 2. Files are served by path
//! 3. Misses return 404 and mutating methods 405
//! 4. Cross-cutting middleware still decorates static responses

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use assistant_relay::adapters::assistants::MockAssistantService;
use assistant_relay::adapters::http::{app_router, AssistantAppState};
use assistant_relay::adapters::InMemoryRateLimiter;
use assistant_relay::application::{PollPolicy, RunTurnHandler};
use assistant_relay::config::{RateLimitConfig, ServerConfig};
use assistant_relay::ports::RateLimiter;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn static_app(static_dir: &Path) -> Router {
    let policy = PollPolicy::new(1, Duration::from_secs(1), Duration::from_millis(1));
    let handler = RunTurnHandler::new(
        Arc::new(MockAssistantService::new()),
        "asst_test",
        policy,
    );
    let state = AssistantAppState::new(Arc::new(handler));
    let limiter: Arc<dyn RateLimiter> =
        Arc::new(InMemoryRateLimiter::new(RateLimitConfig::default()));

    let config = ServerConfig {
        cors_origins: Some("https://app.example.com".to_string()),
        static_dir: static_dir.to_path_buf(),
        ..Default::default()
    };

    app_router(state, limiter, &config)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn serves_index_for_directory_requests() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>Relay</h1>").unwrap();
    let app = static_app(dir.path());

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert_eq!(body_string(response).await, "<h1>Relay</h1>");
}

#[tokio::test]
async fn serves_assets_by_path() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("app.js"), "console.log(1);").unwrap();
    let app = static_app(dir.path());

    let response = app.oneshot(get("/app.js")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "console.log(1);");
}

#[tokio::test]
async fn missing_asset_returns_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let app = static_app(dir.path());

    let response = app.oneshot(get("/nope.txt")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn static_paths_reject_mutating_methods() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>Relay</h1>").unwrap();
    let app = static_app(dir.path());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/index.html")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn static_responses_carry_cors_headers() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>Relay</h1>").unwrap();
    let app = static_app(dir.path());

    let request = Request::builder()
        .method(Method::GET)
        .uri("/")
        .header(header::ORIGIN, "https://app.example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "https://app.example.com"
    );
}
