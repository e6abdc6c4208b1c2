//! Wire types for the book platform chat endpoints.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Request body for `/api/stream` and `/api/chat`. The system prompt rides
/// in its own field, never inside the message list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub system: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
}

impl ChatRequest {
    pub fn new(system: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            system: system.into(),
            messages,
            stream: true,
        }
    }

    pub fn without_streaming(mut self) -> Self {
        self.stream = false;
        self
    }
}

/// Reply body from the non-streaming `/api/chat` endpoint.
#[derive(Debug, Deserialize)]
pub struct ReplyResponse {
    pub reply: String,
}

/// Events one chat exchange emits toward the UI. Every exchange ends with
/// exactly one of `Done` or `Failed`.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    Token(String),
    Done,
    Failed(String),
}
