//! Run identity and status enumeration.
//!
//! A run is one asynchronous processing attempt against a thread. The remote
//! service owns the lifecycle; this module only classifies the statuses it
//! reports so the polling loop knows when to stop.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for a remote run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(String);

impl RunId {
    /// Creates a RunId from a remote-issued identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status reported by the remote service for a run.
///
/// `Completed` is the only success terminal. `Failed`, `Cancelled` and
/// `Expired` are terminal failures. `RequiresAction` is terminal here because
/// the tool-output flow is not supported. `Queued` and `InProgress` keep the
/// polling loop going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    Completed,
    Failed,
    Cancelled,
    Expired,
    RequiresAction,
}

impl RunStatus {
    /// Returns true once no further polling is useful.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RunStatus::Queued | RunStatus::InProgress)
    }

    /// Returns the wire form of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::Completed => "completed",
            RunStatus::Failed => "failed",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Expired => "expired",
            RunStatus::RequiresAction => "requires_action",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One assistant-processing attempt tied to a thread.
///
/// Created per turn, never reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub id: RunId,
    pub status: RunStatus,
}

impl Run {
    pub fn new(id: RunId, status: RunStatus) -> Self {
        Self { id, status }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queued_and_in_progress_are_not_terminal() {
        assert!(!RunStatus::Queued.is_terminal());
        assert!(!RunStatus::InProgress.is_terminal());
    }

    #[test]
    fn completed_is_terminal() {
        assert!(RunStatus::Completed.is_terminal());
    }

    #[test]
    fn failure_states_are_terminal() {
        assert!(RunStatus::Failed.is_terminal());
        assert!(RunStatus::Cancelled.is_terminal());
        assert!(RunStatus::Expired.is_terminal());
    }

    #[test]
    fn requires_action_is_terminal() {
        assert!(RunStatus::RequiresAction.is_terminal());
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&RunStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(
            serde_json::to_string(&RunStatus::RequiresAction).unwrap(),
            "\"requires_action\""
        );
    }

    #[test]
    fn deserializes_from_snake_case_json() {
        let status: RunStatus = serde_json::from_str("\"queued\"").unwrap();
        assert_eq!(status, RunStatus::Queued);

        let status: RunStatus = serde_json::from_str("\"requires_action\"").unwrap();
        assert_eq!(status, RunStatus::RequiresAction);
    }

    #[test]
    fn unknown_status_fails_to_deserialize() {
        let result: Result<RunStatus, _> = serde_json::from_str("\"incomplete\"");
        assert!(result.is_err());
    }

    #[test]
    fn display_matches_wire_form() {
        assert_eq!(format!("{}", RunStatus::InProgress), "in_progress");
        assert_eq!(format!("{}", RunStatus::Completed), "completed");
    }

    #[test]
    fn run_id_preserves_value() {
        let id = RunId::new("run_123");
        assert_eq!(id.as_str(), "run_123");
        assert_eq!(format!("{}", id), "run_123");
    }
}
