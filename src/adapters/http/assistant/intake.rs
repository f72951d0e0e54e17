//! Request body intake for the assistant endpoint.
//!
//! Reads the raw body under a hard size cap and decodes it into a
//! [`TurnRequest`]. Some hosts hand the handler an already-parsed JSON
//! value instead of (or alongside) the raw byte stream; decoding therefore
//! runs through an explicit ordered list of strategies rather than a single
//! parse call, and the first success wins.

use axum::body::{Body, Bytes};
use futures::StreamExt;
use serde_json::Value;
use thiserror::Error;

use super::dto::TurnRequest;
use crate::domain::ThreadId;

/// Hard cap on the inbound payload size, in bytes.
pub const MAX_BODY_BYTES: usize = 1_000_000;

/// Errors produced while reading or decoding the request body.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum IntakeError {
    /// The payload exceeded [`MAX_BODY_BYTES`]; the read was aborted.
    #[error("request body too large")]
    TooLarge,

    /// The transport failed mid-read.
    #[error("request body could not be read: {details}")]
    Unreadable { details: String },

    /// No decoding strategy produced a JSON value.
    #[error("request body is not valid JSON: {details}")]
    InvalidJson { details: String },

    /// The payload decoded, but not to a JSON object.
    #[error("request body is not a JSON object")]
    NotAnObject,

    /// The object has no `message` field, or it is not a string.
    #[error("'message' field is missing or not a string")]
    MissingMessage,
}

/// Inbound payload in whichever representations the host delivered.
#[derive(Debug, Clone, Default)]
pub struct IntakeBody {
    pre_parsed: Option<Value>,
    raw: Option<Bytes>,
}

impl IntakeBody {
    /// Payload available only as raw bytes (the usual case).
    pub fn from_bytes(raw: Bytes) -> Self {
        Self {
            pre_parsed: None,
            raw: Some(raw),
        }
    }

    /// Payload the host already parsed into a JSON value.
    pub fn from_value(value: Value) -> Self {
        Self {
            pre_parsed: Some(value),
            raw: None,
        }
    }

    /// Payload with both representations present.
    pub fn new(pre_parsed: Option<Value>, raw: Option<Bytes>) -> Self {
        Self { pre_parsed, raw }
    }
}

/// One way of decoding the payload into a JSON value.
#[derive(Debug, Clone, Copy, PartialEq)]
enum DecodeStrategy {
    /// Use a pre-parsed JSON object as-is.
    PreParsedObject,
    /// Decode the raw bytes as JSON text.
    RawJson,
    /// Last resort: re-attempt the pre-parsed value, parsing it when it is
    /// itself a JSON-encoded string.
    PreParsedFallback,
}

/// Strategies in precedence order.
const DECODE_ORDER: [DecodeStrategy; 3] = [
    DecodeStrategy::PreParsedObject,
    DecodeStrategy::RawJson,
    DecodeStrategy::PreParsedFallback,
];

impl DecodeStrategy {
    /// Applies the strategy; `None` when it does not apply to this body.
    fn try_decode(self, body: &IntakeBody) -> Option<Result<Value, IntakeError>> {
        match self {
            DecodeStrategy::PreParsedObject => match &body.pre_parsed {
                Some(value) if value.is_object() => Some(Ok(value.clone())),
                _ => None,
            },
            DecodeStrategy::RawJson => body.raw.as_ref().map(|bytes| {
                serde_json::from_slice(bytes).map_err(|e| IntakeError::InvalidJson {
                    details: e.to_string(),
                })
            }),
            DecodeStrategy::PreParsedFallback => match &body.pre_parsed {
                Some(Value::String(text)) => Some(serde_json::from_str(text).map_err(|e| {
                    IntakeError::InvalidJson {
                        details: e.to_string(),
                    }
                })),
                Some(value) => Some(Ok(value.clone())),
                None => None,
            },
        }
    }
}

/// Reads the request body, aborting as soon as the size cap is exceeded.
pub async fn read_body(body: Body) -> Result<Bytes, IntakeError> {
    let mut stream = body.into_data_stream();
    let mut collected = Vec::new();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| IntakeError::Unreadable {
            details: e.to_string(),
        })?;
        if collected.len() + chunk.len() > MAX_BODY_BYTES {
            return Err(IntakeError::TooLarge);
        }
        collected.extend_from_slice(&chunk);
    }

    Ok(Bytes::from(collected))
}

/// Parses and validates the payload into a [`TurnRequest`].
pub fn parse(body: &IntakeBody) -> Result<TurnRequest, IntakeError> {
    let value = decode(body)?;
    let object = value.as_object().ok_or(IntakeError::NotAnObject)?;

    let message = object
        .get("message")
        .and_then(Value::as_str)
        .ok_or(IntakeError::MissingMessage)?;

    // A non-string thread_id is treated as absent; the turn then starts a
    // fresh thread rather than failing
    let thread_id = object
        .get("thread_id")
        .and_then(Value::as_str)
        .map(ThreadId::from);

    Ok(TurnRequest {
        message: message.to_string(),
        thread_id,
    })
}

/// Runs the decode strategies in order. On total failure, the first
/// failure encountered is the one reported.
fn decode(body: &IntakeBody) -> Result<Value, IntakeError> {
    let mut first_failure = None;

    for strategy in DECODE_ORDER {
        match strategy.try_decode(body) {
            Some(Ok(value)) => return Ok(value),
            Some(Err(e)) => {
                first_failure.get_or_insert(e);
            }
            None => {}
        }
    }

    Err(first_failure.unwrap_or(IntakeError::InvalidJson {
        details: "empty body".to_string(),
    }))
}
