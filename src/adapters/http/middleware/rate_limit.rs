//! Rate limiting middleware for axum.
//!
//! This module provides middleware that enforces the per-client fixed-window
//! limit through the `RateLimiter` port.
//!
//! Client identity is resolved in order of precedence:
//! 1. First entry of `X-Forwarded-For` (reverse proxy setups)
//! 2. Transport-level remote address from `ConnectInfo`
//! 3. The literal `"unknown"` (conflates all unidentifiable clients into
//!    one bucket)

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::ports::RateLimiter;

/// Rate limiter middleware state.
pub type RateLimiterState = Arc<dyn RateLimiter>;

/// Rate limiting middleware for the assistant endpoint.
///
/// Only `POST` consumes budget; other methods fall through to the router's
/// 405 without being counted, and preflights are answered before this layer
/// runs. A denied request is answered directly with the 429 wire shape.
pub async fn rate_limit_middleware(
    State(limiter): State<RateLimiterState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != Method::POST {
        return next.run(request).await;
    }

    let client_id = extract_client_id(&request, connect_info.as_ref());
    if !limiter.check_and_record(&client_id).await {
        tracing::warn!(client = %client_id, "rate limit exceeded");
        return rate_limited_response();
    }

    next.run(request).await
}

/// Resolve the client identity used as the rate-limit key.
fn extract_client_id<B>(
    request: &axum::http::Request<B>,
    connect_info: Option<&ConnectInfo<SocketAddr>>,
) -> String {
    // X-Forwarded-For first: the transport peer is the proxy, not the client
    if let Some(forwarded) = request
        .headers()
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    connect_info
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// 429 Too Many Requests with the documented wire shape.
fn rate_limited_response() -> Response {
    (
        StatusCode::TOO_MANY_REQUESTS,
        Json(serde_json::json!({ "error": "Rate limit exceeded" })),
    )
        .into_response()
}
