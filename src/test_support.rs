//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::BTreeMap;

use crate::api::{ChatReply, Metadata, Source};
use crate::core::state::{Session, SessionState};

/// A session that has already been initialized, with "greeting" as its
/// first assistant message.
pub fn ready_session() -> Session {
    let mut session = Session::new("greeting");
    session.state = SessionState::Ready;
    session
}

/// A minimal chat reply with no sources or metadata.
pub fn reply_with(text: &str) -> ChatReply {
    ChatReply {
        response: text.to_string(),
        sources: Vec::new(),
        metadata: None,
    }
}

/// A fully-populated source, as the backend returns for feedback records.
pub fn sample_source() -> Source {
    Source {
        feedback_id: "FB-1042".to_string(),
        project: "Coastal Livelihoods".to_string(),
        course: "Seaweed Cultivation".to_string(),
        centre: "Rameswaram".to_string(),
        batch: "B-07".to_string(),
        date: "2024-03-18".to_string(),
        trainer: "A. Kumar".to_string(),
        logged_by: "field-office".to_string(),
        content_types: vec!["observation".to_string(), "suggestion".to_string()],
        relevance_score: 0.873,
    }
}

pub fn sample_metadata(relevant_count: i64, filter_keys: &[&str]) -> Metadata {
    let mut filters_applied = BTreeMap::new();
    for key in filter_keys {
        filters_applied.insert(key.to_string(), "value".to_string());
    }
    Metadata {
        relevant_count,
        filters_applied,
    }
}
