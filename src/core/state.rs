//! # Session State
//!
//! Core business state for sift. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! Session
//! ├── state: SessionState        // gate for which events are legal
//! ├── transcript: Vec<Message>   // append-only conversation log
//! └── display: StatusDisplay     // readiness indicator for the title bar
//! ```
//!
//! State changes only happen through `update(session, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use crate::api::{ChatReply, Metadata, Source};
use crate::core::status::StatusDisplay;

/// Who produced a transcript message. Closed set — everything the UI needs
/// (label, styling) is looked up from this enum, never from strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn label(self) -> &'static str {
        match self {
            Sender::User => "you",
            Sender::Assistant => "assistant",
        }
    }
}

/// One entry in the transcript. Immutable once appended.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    pub sources: Vec<Source>,
    pub metadata: Option<Metadata>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Message {
            sender: Sender::User,
            text: text.into(),
            sources: Vec::new(),
            metadata: None,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Message {
            sender: Sender::Assistant,
            text: text.into(),
            sources: Vec::new(),
            metadata: None,
        }
    }

    /// An assistant message carrying a full backend reply: answer text plus
    /// whatever sources and metadata came with it.
    pub fn reply(reply: ChatReply) -> Self {
        Message {
            sender: Sender::Assistant,
            text: reply.response,
            sources: reply.sources,
            metadata: reply.metadata,
        }
    }
}

/// Lifecycle of the session. Exactly one value at any time; `update()` uses
/// it to decide which actions are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Uninitialized,
    Initializing,
    Ready,
    /// A chat request is in flight. Further sends are dropped, not queued.
    Processing,
    Failed,
}

impl SessionState {
    pub fn label(self) -> &'static str {
        match self {
            SessionState::Uninitialized => "Uninitialized",
            SessionState::Initializing => "Initializing...",
            SessionState::Ready => "Ready",
            SessionState::Processing => "Processing...",
            SessionState::Failed => "Failed",
        }
    }
}

pub struct Session {
    pub state: SessionState,
    pub transcript: Vec<Message>,
    pub display: StatusDisplay,
}

impl Session {
    /// A fresh session. A non-blank greeting becomes the first assistant
    /// message — the one `ClearChat` retains.
    pub fn new(greeting: &str) -> Self {
        let mut transcript = Vec::new();
        if !greeting.trim().is_empty() {
            transcript.push(Message::assistant(greeting));
        }
        Session {
            state: SessionState::default(),
            transcript,
            display: StatusDisplay::NotReady,
        }
    }

    /// Reset the transcript, keeping only the first assistant message that
    /// existed before the clear (the greeting, if one was ever shown).
    pub fn clear_transcript(&mut self) {
        let greeting = self
            .transcript
            .iter()
            .find(|m| m.sender == Sender::Assistant)
            .cloned();
        self.transcript.clear();
        if let Some(greeting) = greeting {
            self.transcript.push(greeting);
        }
    }
}
