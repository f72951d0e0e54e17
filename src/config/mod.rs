//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `ASSISTANT_RELAY_` prefix and nested values use underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use assistant_relay::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server binds to {}:{}", config.server.host, config.server.port);
//! ```

mod assistant;
mod error;
mod rate_limit;
mod server;

pub use assistant::AssistantConfig;
pub use error::{ConfigError, ValidationError};
pub use rate_limit::RateLimitConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the relay. Load using
/// [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (bind address, timeouts, CORS, static assets)
    #[serde(default)]
    pub server: ServerConfig,

    /// Remote assistant service and polling policy
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Per-client rate limiting
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `ASSISTANT_RELAY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `ASSISTANT_RELAY__SERVER__PORT=3000` -> `server.port = 3000`
    /// - `ASSISTANT_RELAY__ASSISTANT__API_KEY=...` -> `assistant.api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ASSISTANT_RELAY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Performs semantic validation of configuration:
    /// - Bind address and timeout ranges
    /// - Required remote credential and assistant identity
    /// - Polling policy sanity, including that the polling budget fits
    ///   inside the request timeout so the relay answers before the
    ///   transport gives up
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.assistant.validate()?;
        self.rate_limit.validate()?;

        if self.assistant.poll_budget_ms >= self.server.request_timeout_secs * 1_000 {
            return Err(ValidationError::PollBudgetExceedsTimeout);
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to set environment variables for testing
    /// Uses double underscores to separate nested config values
    fn set_minimal_env() {
        env::set_var("ASSISTANT_RELAY__ASSISTANT__API_KEY", "sk-test-xxx");
        env::set_var("ASSISTANT_RELAY__ASSISTANT__ASSISTANT_ID", "asst_test");
    }

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("ASSISTANT_RELAY__ASSISTANT__API_KEY");
        env::remove_var("ASSISTANT_RELAY__ASSISTANT__ASSISTANT_ID");
        env::remove_var("ASSISTANT_RELAY__SERVER__PORT");
        env::remove_var("ASSISTANT_RELAY__SERVER__ENVIRONMENT");
        env::remove_var("ASSISTANT_RELAY__RATE_LIMIT__MAX_REQUESTS");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.assistant.api_key.as_deref(), Some("sk-test-xxx"));
        assert_eq!(config.assistant.assistant_id.as_deref(), Some("asst_test"));
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok());
        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.rate_limit.window_ms, 60_000);
        assert_eq!(config.rate_limit.max_requests, 20);
    }

    #[test]
    fn test_validate_rejects_missing_credential() {
        let config = AppConfig {
            server: ServerConfig::default(),
            assistant: AssistantConfig::default(),
            rate_limit: RateLimitConfig::default(),
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired("ASSISTANT__API_KEY"))
        ));
    }

    #[test]
    fn test_validate_rejects_budget_above_request_timeout() {
        let mut config = AppConfig {
            server: ServerConfig::default(),
            assistant: AssistantConfig {
                api_key: Some("sk-xxx".to_string()),
                assistant_id: Some("asst_xxx".to_string()),
                ..Default::default()
            },
            rate_limit: RateLimitConfig::default(),
        };
        config.assistant.poll_budget_ms = 40_000; // above the 30s request timeout
        assert!(matches!(
            config.validate(),
            Err(ValidationError::PollBudgetExceedsTimeout)
        ));
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("ASSISTANT_RELAY__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_custom_rate_limit() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("ASSISTANT_RELAY__RATE_LIMIT__MAX_REQUESTS", "5");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.rate_limit.max_requests, 5);
    }
}
