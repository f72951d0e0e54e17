//! Rate limiting port for protecting the relay endpoint.
//!
//! This port defines the interface for per-client rate limiting using a
//! fixed-window counter. Implementations must be safe under concurrent
//! requests from the same client.

use async_trait::async_trait;

/// Port for per-client rate limiting.
///
/// One call both records the request and answers whether it is allowed, so
/// the read-modify-write on a client's counter stays a single atomic unit
/// under concurrency.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Records one request for `client_id` and returns whether it fits the
    /// configured budget.
    ///
    /// The request that pushes the counter past the limit is itself denied,
    /// and still counts against the window.
    async fn check_and_record(&self, client_id: &str) -> bool;
}
