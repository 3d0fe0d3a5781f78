// Public modules
pub mod chat;
pub mod client;
pub mod conversation;
pub mod error;
pub mod observability;
pub mod types;

// Re-exports
pub use client::{FundFacts, QueryBackend};
pub use conversation::{Author, Conversation, FALLBACK_ANSWER, Message};
pub use error::{Error, Result};
pub use types::*;
