//! Rate limiter adapters.
//!
//! Implementations of the RateLimiter port.
//!
//! ## Available Adapters
//!
//! - `InMemoryRateLimiter` - Fixed-window counter for single-process deployments
//!
//! ## Usage
//!
//! ```ignore
//! use assistant_relay::adapters::rate_limiter::InMemoryRateLimiter;
//! use assistant_relay::config::RateLimitConfig;
//!
//! let limiter = InMemoryRateLimiter::new(RateLimitConfig::default());
//! ```

mod in_memory;

pub use in_memory::InMemoryRateLimiter;
