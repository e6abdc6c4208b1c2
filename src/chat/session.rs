//! Per-page chat transcript state.
//!
//! One session lives behind each chatbot page for the lifetime of the
//! process: navigating away keeps the transcript, returning shows it
//! again. The session owns the ordering rules (user message first, then
//! an empty assistant message the stream appends into) while the
//! transport merely delivers events.

use tracing::warn;

use crate::book::ChatbotConfig;

use super::models::{ChatEvent, ChatMessage, ChatRequest, Role};
use super::prompt::build_system_prompt;

/// Opening assistant message seeded into every fresh session.
pub const GREETING: &str = "What caught your attention most in this chapter?";

#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    in_flight: bool,
    skip_blank_tokens: bool,
    last_error: Option<String>,
}

impl ChatSession {
    pub fn new(skip_blank_tokens: bool) -> Self {
        Self {
            messages: vec![ChatMessage::assistant(GREETING)],
            in_flight: false,
            skip_blank_tokens,
            last_error: None,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// True while an exchange is running; sends are refused meanwhile.
    pub fn is_generating(&self) -> bool {
        self.in_flight
    }

    /// True while the reply has not produced its first visible character.
    pub fn awaiting_reply(&self) -> bool {
        self.in_flight
            && self
                .messages
                .last()
                .is_some_and(|m| m.role == Role::Assistant && m.content.is_empty())
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Start an exchange for the trimmed input. Returns the request to
    /// hand to the transport, or `None` when the input is blank or a
    /// reply is already streaming.
    pub fn begin_send(
        &mut self,
        input: &str,
        config: &ChatbotConfig,
        chapter_title: &str,
    ) -> Option<ChatRequest> {
        let text = input.trim();
        if text.is_empty() || self.in_flight {
            return None;
        }
        self.last_error = None;
        self.messages.push(ChatMessage::user(text));
        let request = ChatRequest::new(
            build_system_prompt(config, chapter_title),
            self.messages.clone(),
        );
        // Insertion point for streamed tokens.
        self.messages.push(ChatMessage::assistant(""));
        self.in_flight = true;
        Some(request)
    }

    pub fn apply(&mut self, event: ChatEvent) {
        match event {
            ChatEvent::Token(token) => self.append_token(&token),
            ChatEvent::Done => self.in_flight = false,
            ChatEvent::Failed(reason) => {
                self.in_flight = false;
                self.last_error = Some(reason);
            }
        }
    }

    fn append_token(&mut self, token: &str) {
        if !self.in_flight {
            warn!("token arrived after the exchange ended, ignoring");
            return;
        }
        if self.skip_blank_tokens && token.trim().is_empty() {
            return;
        }
        match self.messages.last_mut() {
            Some(last) if last.role == Role::Assistant => last.content.push_str(token),
            _ => warn!("no assistant message to stream into"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config() -> ChatbotConfig {
        ChatbotConfig::default()
    }

    fn last_content(session: &ChatSession) -> &str {
        &session.messages().last().unwrap().content
    }

    #[test]
    fn fresh_sessions_open_with_the_greeting() {
        let session = ChatSession::new(false);
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].role, Role::Assistant);
        assert_eq!(session.messages()[0].content, GREETING);
        assert!(!session.is_generating());
    }

    #[test]
    fn blank_input_changes_nothing() {
        let mut session = ChatSession::new(false);
        assert!(session.begin_send("", &config(), "Ch").is_none());
        assert!(session.begin_send("   \n\t", &config(), "Ch").is_none());
        assert_eq!(session.messages().len(), 1);
        assert!(!session.is_generating());
    }

    #[test]
    fn begin_send_builds_the_request_and_the_insertion_point() {
        let mut session = ChatSession::new(false);
        let request = session.begin_send("  What is the tower? ", &config(), "Ch").unwrap();

        // Request: greeting plus the trimmed user message, system apart.
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].content, GREETING);
        assert_eq!(request.messages[1].role, Role::User);
        assert_eq!(request.messages[1].content, "What is the tower?");
        assert!(request.system.contains("Discuss Ch."));
        assert!(request.stream);

        // Transcript: greeting, user, then the empty assistant message.
        assert_eq!(session.messages().len(), 3);
        assert_eq!(last_content(&session), "");
        assert!(session.is_generating());
        assert!(session.awaiting_reply());
    }

    #[test]
    fn sends_are_refused_while_a_reply_streams() {
        let mut session = ChatSession::new(false);
        session.begin_send("first", &config(), "Ch").unwrap();
        assert!(session.begin_send("second", &config(), "Ch").is_none());
        assert_eq!(session.messages().len(), 3);
    }

    #[test]
    fn tokens_append_verbatim_including_whitespace() {
        let mut session = ChatSession::new(false);
        session.begin_send("hola", &config(), "Ch").unwrap();
        for token in ["Hola", " ", "mundo"] {
            session.apply(ChatEvent::Token(token.to_string()));
        }
        assert_eq!(last_content(&session), "Hola mundo");
        assert!(!session.awaiting_reply());
    }

    #[test]
    fn blank_tokens_can_be_skipped_by_policy() {
        let mut session = ChatSession::new(true);
        session.begin_send("hola", &config(), "Ch").unwrap();
        for token in ["Hola", " ", "mundo"] {
            session.apply(ChatEvent::Token(token.to_string()));
        }
        assert_eq!(last_content(&session), "Holamundo");
    }

    #[test]
    fn done_unlocks_the_session() {
        let mut session = ChatSession::new(false);
        session.begin_send("one", &config(), "Ch").unwrap();
        session.apply(ChatEvent::Token("reply".to_string()));
        session.apply(ChatEvent::Done);
        assert!(!session.is_generating());
        assert!(session.begin_send("two", &config(), "Ch").is_some());
    }

    #[test]
    fn failure_keeps_the_partial_reply_and_surfaces_the_error() {
        let mut session = ChatSession::new(false);
        session.begin_send("one", &config(), "Ch").unwrap();
        session.apply(ChatEvent::Token("par".to_string()));
        session.apply(ChatEvent::Failed("connection reset".to_string()));

        assert!(!session.is_generating());
        assert_eq!(last_content(&session), "par");
        assert_eq!(session.last_error(), Some("connection reset"));

        // The next send clears the error.
        session.begin_send("again", &config(), "Ch").unwrap();
        assert!(session.last_error().is_none());
    }

    #[test]
    fn late_tokens_after_the_exchange_are_ignored() {
        let mut session = ChatSession::new(false);
        session.begin_send("one", &config(), "Ch").unwrap();
        session.apply(ChatEvent::Done);
        session.apply(ChatEvent::Token("stray".to_string()));
        assert_eq!(last_content(&session), "");
    }
}
