//! CORS middleware for axum.
//!
//! Origins are checked against an exact-match allow-list. Preflight
//! `OPTIONS` requests answer 204 with no body for every path, before
//! routing. Requests from unlisted origins are still served; they just get
//! no allow header, so the browser refuses the response on its side.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Exact-match origin allow-list.
#[derive(Debug, Clone, Default)]
pub struct CorsPolicy {
    allowed_origins: Vec<String>,
}

impl CorsPolicy {
    /// Creates a policy from the configured origin list.
    pub fn new(allowed_origins: Vec<String>) -> Self {
        Self { allowed_origins }
    }

    /// Whether the given origin is allow-listed (exact string match).
    pub fn allows(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|allowed| allowed == origin)
    }
}

/// CORS middleware.
///
/// Short-circuits preflights to 204 and decorates every outgoing response
/// with the allow headers.
pub async fn cors_middleware(
    State(policy): State<CorsPolicy>,
    request: Request,
    next: Next,
) -> Response {
    let origin = allowed_origin(&policy, request.headers());

    let mut response = if request.method() == Method::OPTIONS {
        // Preflights never reach the router
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };

    apply_cors_headers(response.headers_mut(), origin);
    response
}

/// Echo value for `Access-Control-Allow-Origin` when the request origin is
/// allow-listed.
fn allowed_origin(policy: &CorsPolicy, headers: &HeaderMap) -> Option<HeaderValue> {
    headers
        .get(header::ORIGIN)
        .filter(|value| value.to_str().map(|o| policy.allows(o)).unwrap_or(false))
        .cloned()
}

fn apply_cors_headers(headers: &mut HeaderMap, origin: Option<HeaderValue>) {
    if let Some(origin) = origin {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
        headers.insert(header::VARY, HeaderValue::from_static("Origin"));
    }
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
}
