//! Assistant service adapters.
//!
//! Implementations of the AssistantService port.
//!
//! ## Available Adapters
//!
//! - `OpenAIAssistantService` - OpenAI Assistants v2 API over HTTPS
//! - `MockAssistantService` - Scripted mock for testing

mod mock;
mod openai;

pub use mock::{MockAssistantService, RecordedCall};
pub use openai::{OpenAIAssistantService, OpenAIConfig};
