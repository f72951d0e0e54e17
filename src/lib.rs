//! Assistant Relay - Conversational assistant proxy.
//!
//! This crate relays end-user chat messages to a remote assistant service,
//! manages conversation threads, and polls asynchronous runs under a strict
//! wall-clock budget.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
