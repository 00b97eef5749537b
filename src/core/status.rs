//! Maps a readiness probe result to the display state shown in the title bar.
//!
//! Pure mapping, no side effects; the controller stores the result on the
//! session and the title bar renders its label.

use crate::api::{ApiError, StatusSnapshot};

/// Human-readable readiness indicator derived from a status probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusDisplay {
    /// Backend is initialized; carries the rendered "Ready (N chunks)" label.
    Ready(String),
    /// Backend reachable but the index isn't built yet.
    NotReady,
    /// Probe failed; carries either "Status Check Failed" or "Connection Error".
    Error(String),
}

impl StatusDisplay {
    pub fn label(&self) -> &str {
        match self {
            StatusDisplay::Ready(label) => label,
            StatusDisplay::NotReady => "Not Initialized",
            StatusDisplay::Error(label) => label,
        }
    }
}

/// Collapse a probe result to its display state.
///
/// A backend-reported failure means the service answered but couldn't produce
/// a status; anything else (transport, malformed body) means we never got one.
pub fn display(result: &Result<StatusSnapshot, ApiError>) -> StatusDisplay {
    match result {
        Ok(snapshot) if snapshot.initialized => {
            StatusDisplay::Ready(format!("Ready ({} chunks)", snapshot.total_chunks))
        }
        Ok(_) => StatusDisplay::NotReady,
        Err(ApiError::Backend(_)) => StatusDisplay::Error("Status Check Failed".to_string()),
        Err(_) => StatusDisplay::Error("Connection Error".to_string()),
    }
}
