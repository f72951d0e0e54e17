//! Domain layer - vocabulary of a conversation turn.
//!
//! Contains the value objects shared across the relay: thread and run
//! identifiers, the run status enumeration, thread messages, and timestamps.
//! No I/O lives here.

mod message;
mod run;
mod thread;
mod timestamp;

pub use message::{MessagePart, MessageRole, ThreadMessage};
pub use run::{Run, RunId, RunStatus};
pub use thread::ThreadId;
pub use timestamp::Timestamp;
