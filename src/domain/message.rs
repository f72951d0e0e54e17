//! Thread message roles and content parts.
//!
//! Messages come back from the remote service most-recent-first, each holding
//! a list of typed content parts. Reply extraction only cares about the first
//! text part of the newest assistant message; everything else is carried
//! opaquely.

use serde::{Deserialize, Serialize};

/// Role of a message author within a thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    /// End-user input relayed into the thread.
    User,
    /// Output produced by a run.
    Assistant,
}

impl MessageRole {
    pub fn is_assistant(&self) -> bool {
        matches!(self, MessageRole::Assistant)
    }
}

/// One typed content part of a thread message.
///
/// Non-text parts (images, files) are preserved positionally but never
/// inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessagePart {
    Text(String),
    Other,
}

/// A message within a remote thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadMessage {
    pub role: MessageRole,
    pub parts: Vec<MessagePart>,
}

impl ThreadMessage {
    pub fn new(role: MessageRole, parts: Vec<MessagePart>) -> Self {
        Self { role, parts }
    }

    /// Convenience constructor for a single-text message.
    pub fn text(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![MessagePart::Text(text.into())],
        }
    }

    /// Returns the first text-typed content part, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            MessagePart::Text(value) => Some(value.as_str()),
            MessagePart::Other => None,
        })
    }
}
