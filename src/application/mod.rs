//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Each conversation turn runs through a single command handler that owns
//! validation, thread resolution, run polling, and reply extraction.

mod run_turn;

pub use run_turn::{
    // Handler
    RunTurnHandler,
    // Command and Result
    RunTurnCommand,
    RunTurnResult,
    TurnError,
    // Polling
    PollPolicy,
    NO_REPLY_PLACEHOLDER,
};
