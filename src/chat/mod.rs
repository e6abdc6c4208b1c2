//! Chapter discussion chat: transcript state, prompt composition, and the
//! streaming transport against the book platform endpoints.

pub mod client;
pub mod error;
pub mod models;
pub mod prompt;
pub mod session;
pub mod streaming;

pub use client::{ChatClient, run_exchange};
pub use error::ChatError;
pub use models::{ChatEvent, ChatMessage, ChatRequest, Role};
pub use prompt::build_system_prompt;
pub use session::{ChatSession, GREETING};
pub use streaming::STREAM_ERROR_SENTINEL;
