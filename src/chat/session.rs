//! Core chat session management.
//!
//! This module provides the `ChatSession` struct which ties the
//! conversation store to a query backend and drives each question through
//! the submit / ask / settle cycle.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{from_reader, to_writer_pretty};
use time::OffsetDateTime;

use crate::chat::config::ChatConfig;
use crate::chat::render::Renderer;
use crate::client::QueryBackend;
use crate::conversation::{Conversation, Message};
use crate::error::{Error, Result};

/// A chat session that manages conversation state and query dispatch.
///
/// The session owns the conversation store and guarantees that backend
/// failures never escape as faults: every settlement leaves the store in a
/// consistent, resumable idle state.
pub struct ChatSession<B: QueryBackend> {
    backend: B,
    config: ChatConfig,
    conversation: Conversation,
    request_count: u64,
    failure_count: u64,
}

/// Aggregated stats for a chat session.
#[derive(Debug, Clone)]
pub struct SessionStats {
    /// The number of messages in the conversation.
    pub message_count: usize,
    /// Whether a question is currently outstanding.
    pub in_flight: bool,
    /// Total number of queries dispatched.
    pub request_count: u64,
    /// How many of those settled with the fallback answer.
    pub failure_count: u64,
    /// The configured base address, if overridden.
    pub base_url: Option<String>,
    /// The auto-save transcript path, if set.
    pub transcript_path: Option<PathBuf>,
}

impl<B: QueryBackend> ChatSession<B> {
    /// Creates a new chat session with the given backend and configuration.
    pub fn new(backend: B, config: ChatConfig) -> Self {
        Self {
            backend,
            config,
            conversation: Conversation::new(),
            request_count: 0,
            failure_count: 0,
        }
    }

    /// Sends a question and renders the settlement.
    ///
    /// This method:
    /// 1. Submits the question to the conversation store
    /// 2. Dispatches it to the backend (exactly one settlement)
    /// 3. Settles the store with the outcome and renders the answer
    ///
    /// Empty input and input while a question is outstanding are silent
    /// no-ops, mirroring a disabled input affordance; the method returns
    /// false and the backend is not consulted. Backend failures do not
    /// propagate: they settle as the fixed fallback answer.
    pub async fn send(&mut self, text: &str, renderer: &mut dyn Renderer) -> bool {
        if !self.conversation.submit(text) {
            return false;
        }
        // The store holds the trimmed text; ask with exactly that.
        let question = self
            .conversation
            .last()
            .map(|m| m.text.clone())
            .unwrap_or_default();

        renderer.print_waiting();
        let outcome = self.backend.ask(&question).await;
        self.request_count += 1;
        if outcome.is_err() {
            self.failure_count += 1;
        }
        self.conversation.settle(outcome);
        if let Some(message) = self.conversation.last() {
            renderer.print_answer(message);
        }
        if let Err(err) = self.auto_save_transcript() {
            renderer.print_error(&format!("Failed to auto-save transcript: {}", err));
        }
        true
    }

    /// The conversation store.
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// The active configuration.
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Clears the conversation history.
    pub fn clear(&mut self) {
        self.conversation.clear();
    }

    /// Returns the number of messages in the conversation.
    pub fn message_count(&self) -> usize {
        self.conversation.message_count()
    }

    /// Sets the auto-save transcript path.
    pub fn set_transcript_path(&mut self, path: Option<PathBuf>) {
        self.config.transcript_path = path;
    }

    /// Returns the configured transcript path, if any.
    pub fn transcript_path(&self) -> Option<&Path> {
        self.config.transcript_path.as_deref()
    }

    /// Saves the transcript to the specified path.
    pub fn save_transcript_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let transcript = TranscriptFile::new(self.conversation.messages());
        let file = File::create(path.as_ref())
            .map_err(|err| Error::io("failed to create transcript file", err))?;
        let writer = BufWriter::new(file);
        to_writer_pretty(writer, &transcript).map_err(|err| {
            Error::serialization("failed to serialize transcript", Some(Box::new(err)))
        })
    }

    /// Loads a transcript from disk, replacing the current conversation.
    pub fn load_transcript_from<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let file = File::open(path.as_ref())
            .map_err(|err| Error::io("failed to open transcript file", err))?;
        let reader = BufReader::new(file);
        let transcript: TranscriptFile = from_reader(reader).map_err(|err| {
            Error::serialization("failed to parse transcript", Some(Box::new(err)))
        })?;
        self.conversation.restore(transcript.messages);
        Ok(())
    }

    /// Returns the current session statistics snapshot.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            message_count: self.message_count(),
            in_flight: self.conversation.is_in_flight(),
            request_count: self.request_count,
            failure_count: self.failure_count,
            base_url: self.config.base_url.clone(),
            transcript_path: self.config.transcript_path.clone(),
        }
    }

    fn auto_save_transcript(&self) -> Result<()> {
        if let Some(path) = &self.config.transcript_path {
            self.save_transcript_to(path)
        } else {
            Ok(())
        }
    }
}

#[derive(Serialize, Deserialize)]
struct TranscriptFile {
    version: u8,
    #[serde(with = "time::serde::rfc3339")]
    saved_at: OffsetDateTime,
    messages: Vec<Message>,
}

impl TranscriptFile {
    fn new(messages: &[Message]) -> Self {
        Self {
            version: 1,
            saved_at: OffsetDateTime::now_utc(),
            messages: messages.to_vec(),
        }
    }
}
