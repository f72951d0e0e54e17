//! HTTP adapter for the assistant relay endpoint.

mod dto;
mod handlers;
mod intake;
mod routes;

pub use dto::{ErrorBody, ReplyResponse, TurnRequest};
pub use handlers::{relay_message, AssistantAppState};
pub use intake::{read_body, IntakeBody, IntakeError, MAX_BODY_BYTES};
pub use routes::assistant_routes;
