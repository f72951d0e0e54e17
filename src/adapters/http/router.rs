//! Application router assembly.
//!
//! Wires the assistant API, the static asset fallback, and the
//! cross-cutting middleware stack into one router.

use std::time::Duration;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;

use super::assistant::{assistant_routes, AssistantAppState};
use super::middleware::{cors_middleware, CorsPolicy, RateLimiterState};

/// Assembles the complete application router.
///
/// Non-API paths fall through to the static asset directory, which also
/// answers 405 for methods it does not serve. The CORS middleware wraps
/// everything so preflights short-circuit before routing.
pub fn app_router(
    state: AssistantAppState,
    limiter: RateLimiterState,
    server: &ServerConfig,
) -> Router {
    let cors = CorsPolicy::new(server.cors_origins_list());
    let static_assets = ServeDir::new(&server.static_dir).append_index_html_on_directories(true);

    assistant_routes(state, limiter)
        .fallback_service(static_assets)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    server.request_timeout_secs,
                )))
                .layer(axum::middleware::from_fn_with_state(cors, cors_middleware)),
        )
}
