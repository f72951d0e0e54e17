//! HTTP middleware for axum.
//!
//! This module contains middleware layers for cross-cutting concerns:
//!
//! - `cors` - Origin allow-listing and preflight handling
//! - `rate_limit` - Per-client fixed-window rate limiting

pub mod cors;
pub mod rate_limit;

pub use cors::{cors_middleware, CorsPolicy};
pub use rate_limit::{rate_limit_middleware, RateLimiterState};
