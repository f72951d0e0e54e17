//! In-memory rate limiter implementation.
//!
//! Uses a fixed-window counter algorithm with an in-memory HashMap. Suitable
//! for a single-process deployment; the window resets on the first request
//! after expiry, so up to 2x the budget can pass across a window boundary.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::RateLimitConfig;
use crate::domain::Timestamp;
use crate::ports::RateLimiter;

/// Expired entries are dropped after this many checks, keeping the table
/// bounded over distinct client identities.
const SWEEP_EVERY: u32 = 256;

/// In-memory fixed-window rate limiter.
///
/// Each client identity owns one window. A request inside a live window
/// increments the counter and is allowed while the counter stays within
/// the budget; the request that pushes it past the budget is itself denied.
#[derive(Debug)]
pub struct InMemoryRateLimiter {
    /// Rate limit configuration.
    config: RateLimitConfig,
    /// Per-client window state.
    table: Arc<RwLock<Table>>,
}

#[derive(Debug, Default)]
struct Table {
    windows: HashMap<String, WindowState>,
    checks_since_sweep: u32,
}

/// State for a single rate limit window.
#[derive(Debug, Clone)]
struct WindowState {
    /// Number of requests counted in the current window.
    count: u32,
    /// When the current window started.
    window_start: Timestamp,
}

impl WindowState {
    fn fresh(now: Timestamp) -> Self {
        Self {
            count: 1,
            window_start: now,
        }
    }

    fn is_expired(&self, now: Timestamp, window_ms: u64) -> bool {
        now.millis_since(&self.window_start) > window_ms as i64
    }

    /// Applies one request at `now` and reports whether it is allowed.
    ///
    /// A window older than `window_ms` (strictly) is replaced by a fresh one
    /// starting at `now`; otherwise the counter is incremented first and the
    /// request is allowed while the counter stays within `max`.
    fn admit(&mut self, now: Timestamp, window_ms: u64, max: u32) -> bool {
        if self.is_expired(now, window_ms) {
            *self = Self::fresh(now);
            return true;
        }
        self.count += 1;
        self.count <= max
    }
}

impl InMemoryRateLimiter {
    /// Create a new in-memory rate limiter.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            table: Arc::new(RwLock::new(Table::default())),
        }
    }

    /// Create a rate limiter with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(RateLimitConfig::default())
    }

    /// Clock-injected variant of [`RateLimiter::check_and_record`].
    ///
    /// Lets tests drive window expiry without sleeping.
    pub async fn check_at(&self, client_id: &str, now: Timestamp) -> bool {
        let mut table = self.table.write().await;

        table.checks_since_sweep += 1;
        if table.checks_since_sweep >= SWEEP_EVERY {
            let window_ms = self.config.window_ms;
            table.windows.retain(|_, state| !state.is_expired(now, window_ms));
            table.checks_since_sweep = 0;
        }

        match table.windows.get_mut(client_id) {
            Some(state) => state.admit(now, self.config.window_ms, self.config.max_requests),
            None => {
                table
                    .windows
                    .insert(client_id.to_string(), WindowState::fresh(now));
                true
            }
        }
    }

    /// Number of client identities currently tracked.
    pub async fn tracked_clients(&self) -> usize {
        self.table.read().await.windows.len()
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check_and_record(&self, client_id: &str) -> bool {
        self.check_at(client_id, Timestamp::now()).await
    }
}
