//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `assistants` - Remote assistant service clients (OpenAI, mock)
//! - `http` - REST API and middleware
//! - `rate_limiter` - Request rate limiting

pub mod assistants;
pub mod http;
pub mod rate_limiter;

pub use assistants::OpenAIAssistantService;
pub use rate_limiter::InMemoryRateLimiter;
