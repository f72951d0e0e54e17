//! HTTP DTOs for the assistant relay endpoint.
//!
//! These types pin the wire shape of the endpoint independently of the
//! domain types behind it.

use serde::Serialize;

use crate::domain::{RunStatus, ThreadId};

/// Parsed and validated inbound turn request.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnRequest {
    /// The user's message text.
    pub message: String,
    /// Existing thread to continue, when the caller supplied one.
    pub thread_id: Option<ThreadId>,
}

/// Successful turn payload.
#[derive(Debug, Clone, Serialize)]
pub struct ReplyResponse {
    /// The assistant's textual reply.
    pub reply: String,
    /// Thread the turn ran against; pass it back to continue.
    pub thread_id: ThreadId,
}

/// Structured failure payload.
///
/// `error` is always present; the remaining fields are emitted only when
/// the failure carries them (omitted, not null).
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<ThreadId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_status: Option<RunStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            thread_id: None,
            run_status: None,
            suggestion: None,
            details: None,
        }
    }

    pub fn with_thread_id(mut self, thread_id: ThreadId) -> Self {
        self.thread_id = Some(thread_id);
        self
    }

    pub fn with_run_status(mut self, status: RunStatus) -> Self {
        self.run_status = Some(status);
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}
