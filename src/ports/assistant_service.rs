//! Assistant Service Port - Interface to the remote assistant API.
//!
//! This port abstracts the five remote operations a conversation turn needs:
//! thread creation, message append, run creation, run status polling and
//! message listing. Adapters translate between the remote wire format and
//! the domain types.
//!
//! # Design
//!
//! - One method per remote endpoint, no orchestration here
//! - No retries at this layer; the polling loop owns retry policy
//! - Non-success remote statuses surface as `AssistantError::Status` with
//!   the response body captured for diagnostics

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{MessageRole, Run, RunId, RunStatus, ThreadId, ThreadMessage};

/// Port for the remote assistant service.
///
/// Implementations attach the bearer credential and protocol-version header
/// to every call.
#[async_trait]
pub trait AssistantService: Send + Sync {
    /// Create a new empty conversation thread.
    async fn create_thread(&self) -> Result<ThreadId, AssistantError>;

    /// Append a message to a thread.
    async fn post_message(
        &self,
        thread: &ThreadId,
        role: MessageRole,
        text: &str,
    ) -> Result<(), AssistantError>;

    /// Start a run of the given assistant against the thread.
    ///
    /// Returns the run identifier together with its initial status.
    async fn create_run(&self, thread: &ThreadId, assistant_id: &str)
        -> Result<Run, AssistantError>;

    /// Fetch the current status of a run.
    async fn run_status(&self, thread: &ThreadId, run: &RunId)
        -> Result<RunStatus, AssistantError>;

    /// List the messages of a thread, most recent first.
    async fn list_messages(&self, thread: &ThreadId) -> Result<Vec<ThreadMessage>, AssistantError>;
}

/// Errors from the remote assistant service.
#[derive(Debug, Clone, Error)]
pub enum AssistantError {
    /// Remote responded with a non-success HTTP status.
    #[error("assistant service returned {status}: {body}")]
    Status {
        /// HTTP status code of the response.
        status: u16,
        /// Response body text, kept for diagnostics.
        body: String,
    },

    /// Request timed out before a response arrived.
    #[error("assistant service request timed out")]
    Timeout,

    /// Network failure before or during the exchange.
    #[error("network error: {0}")]
    Network(String),

    /// Response arrived but could not be decoded into the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
}
