//! Wire types for the feedback-insights backend.
//!
//! The backend contract is fixed: three JSON endpoints (`/api/chat`,
//! `/api/initialize`, `/api/status`). These types mirror the bodies exactly;
//! unknown fields are ignored so the backend can grow without breaking us.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/chat`.
#[derive(Serialize, Debug)]
pub struct ChatRequest {
    pub query: String,
}

/// Success body for `POST /api/chat`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

/// A cited evidence snippet backing an assistant reply.
///
/// The backend sends every field on every source, using the empty string for
/// values it doesn't have. Empty therefore means absent; display code skips
/// blank fields.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Source {
    #[serde(default)]
    pub feedback_id: String,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub centre: String,
    #[serde(default)]
    pub batch: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub trainer: String,
    #[serde(default)]
    pub logged_by: String,
    #[serde(default)]
    pub content_types: Vec<String>,
    #[serde(default)]
    pub relevance_score: f64,
}

/// Retrieval metadata attached to a chat reply.
///
/// `BTreeMap` keeps filter keys in a stable order for rendering; the wire
/// format makes no ordering promise.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    #[serde(default)]
    pub relevant_count: i64,
    #[serde(default)]
    pub filters_applied: BTreeMap<String, String>,
}

impl Metadata {
    /// A metadata object that carries no information renders nothing.
    pub fn is_empty(&self) -> bool {
        self.relevant_count == 0 && self.filters_applied.is_empty()
    }
}

/// Success body for `POST /api/initialize`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct InitializeReply {
    pub message: String,
}

/// Result of a readiness query. Read-only, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub initialized: bool,
    pub total_chunks: i64,
}

/// Wire shape of `GET /api/status` — `total_chunks` is nested under
/// `vector_store`; [`StatusSnapshot`] flattens it for callers.
#[derive(Deserialize, Debug)]
pub(crate) struct StatusPayload {
    #[serde(default)]
    pub initialized: bool,
    #[serde(default)]
    pub vector_store: VectorStoreStats,
}

#[derive(Deserialize, Debug, Default)]
pub(crate) struct VectorStoreStats {
    #[serde(default)]
    pub total_chunks: i64,
}

impl From<StatusPayload> for StatusSnapshot {
    fn from(payload: StatusPayload) -> Self {
        StatusSnapshot {
            initialized: payload.initialized,
            total_chunks: payload.vector_store.total_chunks,
        }
    }
}

/// Error body shared by all three endpoints on failure.
#[derive(Deserialize, Debug)]
pub(crate) struct ErrorBody {
    pub error: String,
}
