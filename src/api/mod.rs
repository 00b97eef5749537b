//! Backend API: wire types and the HTTP client.

mod client;
mod types;

pub use client::{ApiError, Backend, HttpBackend};
pub use types::{ChatReply, ChatRequest, InitializeReply, Metadata, Source, StatusSnapshot};
