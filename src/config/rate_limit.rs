//! Rate limiting configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Fixed-window rate limit configuration.
///
/// One window per client identity; the counter resets on the first request
/// after the window elapses.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Window duration in milliseconds
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,

    /// Maximum requests allowed per window
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
}

impl RateLimitConfig {
    /// Validate rate limit configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.window_ms == 0 {
            return Err(ValidationError::InvalidRateLimitWindow);
        }
        if self.max_requests == 0 {
            return Err(ValidationError::InvalidRateLimitMax);
        }
        Ok(())
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_ms: default_window_ms(),
            max_requests: default_max_requests(),
        }
    }
}

fn default_window_ms() -> u64 {
    60_000
}

fn default_max_requests() -> u32 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_defaults() {
        let config = RateLimitConfig::default();
        assert_eq!(config.window_ms, 60_000);
        assert_eq!(config.max_requests, 20);
    }

    #[test]
    fn test_validation_rejects_zero_window() {
        let config = RateLimitConfig {
            window_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidRateLimitWindow)
        ));
    }

    #[test]
    fn test_validation_rejects_zero_max() {
        let config = RateLimitConfig {
            max_requests: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidRateLimitMax)
        ));
    }

    #[test]
    fn test_validation_accepts_defaults() {
        assert!(RateLimitConfig::default().validate().is_ok());
    }
}
