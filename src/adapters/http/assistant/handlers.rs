//! HTTP handlers for the assistant relay endpoint.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{RunTurnCommand, RunTurnHandler, TurnError};

use super::dto::{ErrorBody, ReplyResponse};
use super::intake::{self, IntakeBody, IntakeError};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

/// Shared state for the assistant endpoint.
#[derive(Clone)]
pub struct AssistantAppState {
    turn_handler: Arc<RunTurnHandler>,
}

impl AssistantAppState {
    pub fn new(turn_handler: Arc<RunTurnHandler>) -> Self {
        Self { turn_handler }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/assistant - Relay one chat message to the assistant
pub async fn relay_message(
    State(state): State<AssistantAppState>,
    request: Request,
) -> Response {
    let bytes = match intake::read_body(request.into_body()).await {
        Ok(bytes) => bytes,
        Err(e) => return intake_error_response(e),
    };

    let turn_request = match intake::parse(&IntakeBody::from_bytes(bytes)) {
        Ok(parsed) => parsed,
        Err(e) => return intake_error_response(e),
    };

    let cmd = RunTurnCommand::new(turn_request.message, turn_request.thread_id);
    match state.turn_handler.handle(cmd).await {
        Ok(result) => (
            StatusCode::OK,
            Json(ReplyResponse {
                reply: result.reply,
                thread_id: result.thread_id,
            }),
        )
            .into_response(),
        Err(e) => turn_error_response(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

/// Every intake failure is the caller's fault: all arms map to 400.
fn intake_error_response(error: IntakeError) -> Response {
    let body = match error {
        IntakeError::TooLarge => ErrorBody::new("Request body too large"),
        IntakeError::Unreadable { details } | IntakeError::InvalidJson { details } => {
            ErrorBody::new("Invalid JSON in request body").with_details(details)
        }
        IntakeError::NotAnObject => ErrorBody::new("Request body must be a JSON object"),
        IntakeError::MissingMessage => ErrorBody::new("Missing or invalid 'message' field"),
    };

    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

fn turn_error_response(error: TurnError) -> Response {
    match error {
        TurnError::InvalidInput => (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::new("Missing or invalid 'message' field")),
        )
            .into_response(),
        TurnError::Service(e) => {
            tracing::error!(error = %e, "assistant service call failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(
                    ErrorBody::new("Assistant service request failed")
                        .with_details(e.to_string()),
                ),
            )
                .into_response()
        }
        TurnError::RunIncomplete { thread_id, status } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(
                ErrorBody::new(format!(
                    "The assistant is still processing your message but took longer \
                     than expected. Please try again in a few seconds. Status: {status}"
                ))
                .with_thread_id(thread_id)
                .with_run_status(status)
                .with_suggestion(
                    "Send the message again with the same thread_id to continue the conversation.",
                ),
            ),
        )
            .into_response(),
        TurnError::RunFailed { thread_id, status } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(
                ErrorBody::new(format!("Run did not complete. Status: {status}"))
                    .with_thread_id(thread_id)
                    .with_run_status(status),
            ),
        )
            .into_response(),
        TurnError::RunUnsupported { thread_id, status } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(
                ErrorBody::new("The assistant requires further action which is not supported.")
                    .with_thread_id(thread_id)
                    .with_run_status(status),
            ),
        )
            .into_response(),
        TurnError::NoAssistantReply { thread_id } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody::new("No assistant response found").with_thread_id(thread_id)),
        )
            .into_response(),
    }
}
