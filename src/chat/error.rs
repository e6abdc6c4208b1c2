//! Error types for the chat transport.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("chat endpoint returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The stream carried the upstream failure sentinel instead of content.
    #[error("stream reported an upstream failure")]
    StreamFailed,

    #[error("request was cancelled")]
    Cancelled,

    #[error("failed to parse response: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChatError {
    /// Whether the non-streaming endpoint is worth trying after this
    /// failure. Cancellation means the reader left the page, so nothing
    /// should be retried.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ChatError::Cancelled)
    }
}
