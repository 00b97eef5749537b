//! HTTP client for the feedback-insights backend.
//!
//! The [`Backend`] trait is the seam between the session controller and the
//! network: the TUI event loop holds an `Arc<dyn Backend>`, so tests can
//! substitute a fake and the controller never touches `reqwest` directly.
//!
//! No operation retries and none carries a timeout — the caller decides what
//! a failure means (see `core::action`).

use async_trait::async_trait;
use log::{debug, info, warn};

use super::types::{
    ChatReply, ChatRequest, ErrorBody, InitializeReply, StatusPayload, StatusSnapshot,
};

/// Errors that can occur talking to the backend.
/// The variant decides how the failure surfaces in the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The backend answered with a non-success status. Carries the backend's
    /// own error text, which is shown to the user verbatim.
    Backend(String),
    /// The request never completed (DNS, connection refused, broken body).
    Transport(String),
    /// The backend answered 2xx with a body that doesn't match the contract.
    Parse(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Backend(msg) => write!(f, "backend error: {msg}"),
            ApiError::Transport(msg) => write!(f, "transport error: {msg}"),
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// The three backend operations the session controller drives.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `POST /api/chat` — run a query through the retrieval pipeline.
    async fn chat(&self, query: &str) -> Result<ChatReply, ApiError>;

    /// `POST /api/initialize` — (re)build the backend index.
    async fn initialize(&self) -> Result<InitializeReply, ApiError>;

    /// `GET /api/status` — readiness probe.
    async fn status(&self) -> Result<StatusSnapshot, ApiError>;
}

/// `reqwest` implementation of [`Backend`].
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Turn a non-success response into `ApiError::Backend`, preferring the
    /// `{"error": "..."}` body, then the raw body, then the status line.
    async fn backend_error(response: reqwest::Response) -> ApiError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => parsed.error,
            Err(_) if !body.trim().is_empty() => body,
            Err(_) => status.to_string(),
        };
        warn!("Backend error (HTTP {}): {}", status.as_u16(), message);
        ApiError::Backend(message)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn chat(&self, query: &str) -> Result<ChatReply, ApiError> {
        info!("POST /api/chat ({} chars)", query.len());
        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&ChatRequest {
                query: query.to_string(),
            })
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::backend_error(response).await);
        }

        let reply: ChatReply = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        debug!(
            "Chat reply: {} chars, {} sources",
            reply.response.len(),
            reply.sources.len()
        );
        Ok(reply)
    }

    async fn initialize(&self) -> Result<InitializeReply, ApiError> {
        info!("POST /api/initialize");
        let response = self
            .client
            .post(format!("{}/api/initialize", self.base_url))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::backend_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn status(&self) -> Result<StatusSnapshot, ApiError> {
        debug!("GET /api/status");
        let response = self
            .client
            .get(format!("{}/api/status", self.base_url))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::backend_error(response).await);
        }

        let payload: StatusPayload = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(payload.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let backend = HttpBackend::new("http://localhost:5000/");
        assert_eq!(backend.base_url(), "http://localhost:5000");
    }

    #[test]
    fn test_api_error_display() {
        assert_eq!(
            ApiError::Backend("index missing".into()).to_string(),
            "backend error: index missing"
        );
        assert_eq!(
            ApiError::Transport("connection refused".into()).to_string(),
            "transport error: connection refused"
        );
    }
}
