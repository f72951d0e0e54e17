//! Thread identifier value object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for a remote conversation thread.
///
/// Issued by the remote assistant service; never minted locally. The relay
/// holds no thread state of its own, so callers carry this id between turns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreadId(String);

impl ThreadId {
    /// Creates a ThreadId from a remote-issued identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ThreadId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ThreadId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_id_preserves_value() {
        let id = ThreadId::new("thread_abc123");
        assert_eq!(id.as_str(), "thread_abc123");
    }

    #[test]
    fn thread_id_displays_correctly() {
        let id = ThreadId::new("thread_abc123");
        assert_eq!(format!("{}", id), "thread_abc123");
    }

    #[test]
    fn thread_id_serializes_transparently() {
        let id = ThreadId::new("thread_abc123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"thread_abc123\"");
    }

    #[test]
    fn thread_id_deserializes_from_json_string() {
        let id: ThreadId = serde_json::from_str("\"thread_xyz\"").unwrap();
        assert_eq!(id, ThreadId::new("thread_xyz"));
    }
}
