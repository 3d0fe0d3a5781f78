//! Chat application module for the facts-only assistant.
//!
//! This module provides a REPL chat interface built on top of the fundfacts
//! client library. It supports:
//!
//! - Question submission with a single-flight guard
//! - Answers annotated with their source citation and recency label
//! - Refusals annotated with an investor-education link
//! - Slash commands for session control
//! - Suggested questions dispatched through the normal submit path
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: Core chat session management and query dispatch
//! - [`commands`]: Slash command parsing and handling
//! - [`render`]: Output rendering

mod commands;
mod config;
mod render;
mod session;

pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig};
pub use render::{PlainTextRenderer, Renderer};
pub use session::{ChatSession, SessionStats};

/// Suggested questions shown on the welcome card.
///
/// These dispatch through the same submit entry point as typed input; there
/// is no separate path for suggestion clicks.
pub const EXAMPLE_QUESTIONS: &[&str] = &[
    "What's the exit load on Nippon India Large Cap Fund?",
    "What is the minimum SIP amount?",
    "How to download capital gains statement?",
];
