//! Remote assistant service configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Configuration for the remote assistant service and the polling policy.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// API key for the remote service
    pub api_key: Option<String>,

    /// Identity of the assistant runs are created against
    pub assistant_id: Option<String>,

    /// Base URL of the remote API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-call HTTP timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum number of status polls per run
    #[serde(default = "default_poll_max_attempts")]
    pub poll_max_attempts: u32,

    /// Wall-clock polling budget in milliseconds
    #[serde(default = "default_poll_budget")]
    pub poll_budget_ms: u64,

    /// Sleep between status polls in milliseconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
}

impl AssistantConfig {
    /// Get the per-call HTTP timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get the polling budget as Duration
    pub fn poll_budget(&self) -> Duration {
        Duration::from_millis(self.poll_budget_ms)
    }

    /// Get the polling interval as Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Check if an assistant identity is configured
    pub fn has_assistant_id(&self) -> bool {
        self.assistant_id.as_ref().is_some_and(|id| !id.is_empty())
    }

    /// Validate assistant configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("ASSISTANT__API_KEY"));
        }
        if !self.has_assistant_id() {
            return Err(ValidationError::MissingRequired("ASSISTANT__ASSISTANT_ID"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if self.poll_max_attempts == 0 || self.poll_budget_ms == 0 || self.poll_interval_ms == 0 {
            return Err(ValidationError::InvalidPollPolicy);
        }
        Ok(())
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            assistant_id: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            poll_max_attempts: default_poll_max_attempts(),
            poll_budget_ms: default_poll_budget(),
            poll_interval_ms: default_poll_interval(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_poll_max_attempts() -> u32 {
    8
}

fn default_poll_budget() -> u64 {
    8_000
}

fn default_poll_interval() -> u64 {
    1_000
}
