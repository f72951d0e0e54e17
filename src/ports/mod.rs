//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AssistantService` - Remote assistant API (threads, runs, messages)
//! - `RateLimiter` - Per-client request budget

mod assistant_service;
mod rate_limiter;

pub use assistant_service::{AssistantError, AssistantService};
pub use rate_limiter::RateLimiter;
