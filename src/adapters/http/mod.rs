//! HTTP adapters - REST API implementations.
//!
//! The relay exposes a single JSON endpoint plus static assets; middleware
//! covers CORS and rate limiting.

pub mod assistant;
pub mod middleware;

mod router;

// Re-export key types for convenience
pub use assistant::AssistantAppState;
pub use router::app_router;
