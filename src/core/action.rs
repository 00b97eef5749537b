//! # Actions
//!
//! Everything that can happen in a session becomes an `Action`.
//! User presses Enter? That's `Action::SendMessage`.
//! Backend responds? That's `Action::ResponseOk(reply)`.
//!
//! The `update()` function takes the current session and an action, mutates
//! the session, and returns an `Effect` describing the I/O the caller should
//! perform. No side effects here. Network calls happen elsewhere.
//!
//! ```text
//! Session + Action  →  update()  →  mutated Session + Effect
//! ```
//!
//! This is where the session invariants live:
//! - exactly one chat request in flight (`Processing` gates further sends);
//! - a send is only accepted in `Ready` with non-blank text;
//! - the transcript only shrinks via `ClearChat`, which keeps the greeting.

use log::{debug, info};

use crate::api::{ApiError, ChatReply, StatusSnapshot};
use crate::core::state::{Message, Session, SessionState};
use crate::core::status;

/// Shown in place of a reply when the backend could not be reached at all.
/// Backend-reported errors surface verbatim instead.
pub const CONNECTION_FAILURE_REPLY: &str =
    "I couldn't reach the backend. Please check that it is running and try again.";

#[derive(Debug, Clone)]
pub enum Action {
    /// User asked to (re)build the backend index.
    Initialize,
    /// Initialize call succeeded; carries the backend's confirmation text.
    InitializeOk(String),
    InitializeErr(ApiError),
    /// User submitted query text.
    SendMessage(String),
    /// Chat call completed.
    ResponseOk(ChatReply),
    ResponseErr(ApiError),
    /// User asked for a readiness probe.
    CheckStatus,
    /// Probe completed (either way).
    StatusResult(Result<StatusSnapshot, ApiError>),
    /// User asked to reset the transcript.
    ClearChat,
    Quit,
}

/// I/O the event loop must perform after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    SpawnInitialize,
    SpawnChat(String),
    SpawnStatus,
    Quit,
}

pub fn update(session: &mut Session, action: Action) -> Effect {
    match action {
        Action::Initialize => match session.state {
            SessionState::Uninitialized | SessionState::Failed => {
                info!("Initializing backend index");
                session.state = SessionState::Initializing;
                Effect::SpawnInitialize
            }
            other => {
                debug!("Initialize ignored in state {:?}", other);
                Effect::None
            }
        },

        Action::InitializeOk(message) => {
            session.transcript.push(Message::assistant(message));
            session.state = SessionState::Ready;
            // Refresh the readiness indicator now that the index exists.
            Effect::SpawnStatus
        }

        Action::InitializeErr(err) => {
            info!("Initialization failed: {}", err);
            session
                .transcript
                .push(Message::assistant(init_failure_text(&err)));
            session.state = SessionState::Failed;
            Effect::None
        }

        Action::SendMessage(text) => {
            if session.state != SessionState::Ready {
                debug!("Send ignored in state {:?}", session.state);
                return Effect::None;
            }
            let query = text.trim();
            if query.is_empty() {
                debug!("Send ignored: blank query");
                return Effect::None;
            }
            let query = query.to_string();
            session.transcript.push(Message::user(query.clone()));
            session.state = SessionState::Processing;
            Effect::SpawnChat(query)
        }

        Action::ResponseOk(reply) => {
            session.transcript.push(Message::reply(reply));
            session.state = SessionState::Ready;
            Effect::None
        }

        Action::ResponseErr(err) => {
            info!("Chat request failed: {}", err);
            session
                .transcript
                .push(Message::assistant(chat_failure_text(&err)));
            session.state = SessionState::Ready;
            Effect::None
        }

        Action::CheckStatus => Effect::SpawnStatus,

        Action::StatusResult(result) => {
            session.display = status::display(&result);
            Effect::None
        }

        Action::ClearChat => {
            session.clear_transcript();
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}

/// Backend-reported failures surface verbatim; everything else gets the
/// fixed transport-failure reply.
fn chat_failure_text(err: &ApiError) -> String {
    match err {
        ApiError::Backend(message) => message.clone(),
        ApiError::Transport(_) | ApiError::Parse(_) => CONNECTION_FAILURE_REPLY.to_string(),
    }
}

fn init_failure_text(err: &ApiError) -> String {
    let reason = match err {
        ApiError::Backend(message) => message.clone(),
        ApiError::Transport(_) | ApiError::Parse(_) => "backend unreachable".to_string(),
    };
    format!("Initialization failed: {reason}")
}
