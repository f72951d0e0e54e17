//! HTTP routes for the assistant relay.

use axum::{middleware, routing::post, Router};

use super::handlers::{relay_message, AssistantAppState};
use crate::adapters::http::middleware::{rate_limit_middleware, RateLimiterState};

/// Creates the assistant API router.
///
/// The rate limit runs as a route layer, so static asset requests and
/// unmatched paths never consume budget.
pub fn assistant_routes(state: AssistantAppState, limiter: RateLimiterState) -> Router {
    Router::new()
        .route("/api/assistant", post(relay_message))
        .route_layer(middleware::from_fn_with_state(
            limiter,
            rate_limit_middleware,
        ))
        .with_state(state)
}
