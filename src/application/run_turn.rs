//! RunTurn command handler.
//!
//! Executes one conversation turn against the remote assistant service:
//! validate the message, resolve the thread, post the user message, start a
//! run, poll it to a terminal state under an attempt cap and a wall-clock
//! budget, then extract the assistant's reply.
//!
//! The handler is stateless between turns; conversation continuity lives
//! entirely in the thread id the caller carries.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use crate::domain::{MessageRole, RunStatus, ThreadId};
use crate::ports::{AssistantError, AssistantService};

/// Reply used when a completed run's latest assistant message has no
/// text-typed content part.
pub const NO_REPLY_PLACEHOLDER: &str = "No response";

/// Command to execute one conversation turn.
#[derive(Debug, Clone)]
pub struct RunTurnCommand {
    /// The user's message text.
    pub message: String,
    /// Existing thread to continue, if the caller has one.
    pub thread_id: Option<ThreadId>,
}

impl RunTurnCommand {
    /// Creates a new run turn command.
    pub fn new(message: impl Into<String>, thread_id: Option<ThreadId>) -> Self {
        Self {
            message: message.into(),
            thread_id,
        }
    }
}

/// Polling policy for waiting on a run.
///
/// Both the attempt cap and the wall-clock budget are enforced; whichever
/// triggers first stops polling. The budget exists because the surrounding
/// host may impose its own request-duration ceiling, and the relay must
/// answer the caller before that ceiling hits.
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    /// Maximum number of status fetches per run.
    pub max_attempts: u32,
    /// Wall-clock budget across all polling sleeps and fetches.
    pub budget: Duration,
    /// Sleep between status fetches.
    pub interval: Duration,
}

impl PollPolicy {
    pub fn new(max_attempts: u32, budget: Duration, interval: Duration) -> Self {
        Self {
            max_attempts,
            budget,
            interval,
        }
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 8,
            budget: Duration::from_millis(8_000),
            interval: Duration::from_millis(1_000),
        }
    }
}

/// Errors that can occur while executing a turn.
#[derive(Debug, Clone, Error)]
pub enum TurnError {
    /// Message is missing, blank, or not text.
    #[error("missing or invalid message")]
    InvalidInput,

    /// A remote call failed; nothing is retried, the turn fails whole.
    #[error(transparent)]
    Service(#[from] AssistantError),

    /// Polling ended with the run still in a non-terminal state.
    #[error("run still {status} after polling budget")]
    RunIncomplete {
        thread_id: ThreadId,
        status: RunStatus,
    },

    /// The run reached a terminal failure state.
    #[error("run ended as {status}")]
    RunFailed {
        thread_id: ThreadId,
        status: RunStatus,
    },

    /// The run wants the unsupported tool-output flow.
    #[error("run requires action, which is not supported")]
    RunUnsupported {
        thread_id: ThreadId,
        status: RunStatus,
    },

    /// The thread holds no assistant-authored message to extract.
    #[error("no assistant reply in thread {thread_id}")]
    NoAssistantReply { thread_id: ThreadId },
}

/// Result of a successful turn.
#[derive(Debug, Clone)]
pub struct RunTurnResult {
    /// The assistant's textual reply.
    pub reply: String,
    /// Thread the turn ran against; callers pass it back to continue.
    pub thread_id: ThreadId,
}

/// Handler for RunTurn commands.
pub struct RunTurnHandler {
    service: Arc<dyn AssistantService>,
    assistant_id: String,
    policy: PollPolicy,
}

impl RunTurnHandler {
    /// Creates a new handler with the given dependencies.
    pub fn new(
        service: Arc<dyn AssistantService>,
        assistant_id: impl Into<String>,
        policy: PollPolicy,
    ) -> Self {
        Self {
            service,
            assistant_id: assistant_id.into(),
            policy,
        }
    }

    /// Executes one conversation turn.
    pub async fn handle(&self, cmd: RunTurnCommand) -> Result<RunTurnResult, TurnError> {
        // Validate before touching the network
        let message = cmd.message.trim();
        if message.is_empty() {
            return Err(TurnError::InvalidInput);
        }

        // Resolve the thread: reuse the caller's id, else create one
        let thread_id = match cmd.thread_id {
            Some(id) => id,
            None => {
                let id = self.service.create_thread().await?;
                debug!(thread_id = %id, "created conversation thread");
                id
            }
        };

        // Append the user message, then start a run against it
        self.service
            .post_message(&thread_id, MessageRole::User, message)
            .await?;
        let run = self
            .service
            .create_run(&thread_id, &self.assistant_id)
            .await?;
        debug!(thread_id = %thread_id, run_id = %run.id, status = %run.status, "run started");

        // Poll until terminal, the attempt cap, or the wall-clock budget
        let mut status = run.status;
        let mut attempts = 0u32;
        let started = Instant::now();

        while !status.is_terminal()
            && attempts < self.policy.max_attempts
            && started.elapsed() < self.policy.budget
        {
            sleep(self.policy.interval).await;
            status = self.service.run_status(&thread_id, &run.id).await?;
            attempts += 1;
        }

        match status {
            RunStatus::Completed => self.extract_reply(thread_id).await,
            RunStatus::RequiresAction => Err(TurnError::RunUnsupported { thread_id, status }),
            RunStatus::Failed | RunStatus::Cancelled | RunStatus::Expired => {
                Err(TurnError::RunFailed { thread_id, status })
            }
            RunStatus::Queued | RunStatus::InProgress => {
                warn!(
                    thread_id = %thread_id,
                    run_id = %run.id,
                    status = %status,
                    attempts,
                    "polling exhausted before the run finished"
                );
                Err(TurnError::RunIncomplete { thread_id, status })
            }
        }
    }

    /// Pulls the newest assistant message out of the thread.
    async fn extract_reply(&self, thread_id: ThreadId) -> Result<RunTurnResult, TurnError> {
        let messages = self.service.list_messages(&thread_id).await?;

        // Messages arrive most recent first, so the first assistant-authored
        // entry is the newest
        let latest = messages
            .iter()
            .find(|message| message.role.is_assistant())
            .ok_or_else(|| TurnError::NoAssistantReply {
                thread_id: thread_id.clone(),
            })?;

        let reply = latest
            .first_text()
            .unwrap_or(NO_REPLY_PLACEHOLDER)
            .to_string();

        Ok(RunTurnResult { reply, thread_id })
    }
}
