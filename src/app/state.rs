//! Application state

use std::collections::HashMap;

use crate::book::{Book, Page};
use crate::chat::ChatSession;
use crate::form::{FormSession, SubmittedForms};
use crate::reader::{PaginationEngine, View};
use crate::settings::ReaderSettings;

/// Single-line text input with a character-index cursor.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Input buffer
    pub text: String,
    /// Cursor position in characters
    pub cursor: usize,
}

impl InputState {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Convert character index to byte index
    fn char_to_byte_index(&self, char_idx: usize) -> usize {
        self.text.char_indices().nth(char_idx).map(|(i, _)| i).unwrap_or(self.text.len())
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Insert a character at cursor (cursor is character index)
    pub fn insert_char(&mut self, c: char) {
        let byte_idx = self.char_to_byte_index(self.cursor);
        self.text.insert(byte_idx, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_idx = self.char_to_byte_index(self.cursor);
            self.text.remove(byte_idx);
        }
    }

    /// Delete character at cursor
    pub fn delete_char_forward(&mut self) {
        if self.cursor < self.char_count() {
            let byte_idx = self.char_to_byte_index(self.cursor);
            self.text.remove(byte_idx);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }
}

/// Footer status message
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub message: Option<String>,
    pub is_error: bool,
}

impl StatusLine {
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = false;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = true;
    }

    pub fn clear(&mut self) {
        self.message = None;
        self.is_error = false;
    }
}

/// Keyboard focus on a form page. `field` one past the end of the field
/// list focuses the submit row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormFocus {
    pub field: usize,
    /// Option row within a select or checkboxes field
    pub option: usize,
}

/// Complete application state
#[derive(Debug)]
pub struct AppState {
    pub book: Book,
    pub engine: PaginationEngine,
    pub settings: ReaderSettings,
    /// Chat transcripts, one per chatbot page, kept for the whole run
    pub chats: HashMap<(usize, usize), ChatSession>,
    /// Form answers, one per form page, kept for the whole run
    pub forms: HashMap<(usize, usize), FormSession>,
    pub submitted_forms: SubmittedForms,
    pub chat_input: InputState,
    pub status: StatusLine,
    /// Selected chapter row on the index page
    pub index_selected: usize,
    pub index_scroll: usize,
    pub form_focus: FormFocus,
    pub form_scroll: usize,
    pub audio_scroll: usize,
    /// Frame counter driving small animations
    pub tick: u64,
}

impl AppState {
    pub fn new(book: Book, settings: ReaderSettings) -> Self {
        let engine = PaginationEngine::new(&book);
        Self {
            book,
            engine,
            settings,
            chats: HashMap::new(),
            forms: HashMap::new(),
            submitted_forms: SubmittedForms::default(),
            chat_input: InputState::default(),
            status: StatusLine::default(),
            index_selected: 0,
            index_scroll: 0,
            form_focus: FormFocus::default(),
            form_scroll: 0,
            audio_scroll: 0,
            tick: 0,
        }
    }

    /// Key identifying the current page's chat or form session.
    pub fn page_key(&self) -> Option<(usize, usize)> {
        self.engine.position().map(|p| (p.chapter, p.page))
    }

    pub fn current_page(&self) -> Option<&Page> {
        let pos = self.engine.position()?;
        self.book.page(pos.chapter, pos.page)
    }

    pub fn current_chapter_title(&self) -> &str {
        self.engine
            .position()
            .and_then(|p| self.book.chapter(p.chapter))
            .map_or("", |c| c.title.as_str())
    }

    pub fn current_chat(&self) -> Option<&ChatSession> {
        self.chats.get(&self.page_key()?)
    }

    pub fn current_chat_mut(&mut self) -> Option<&mut ChatSession> {
        let key = self.page_key()?;
        self.chats.get_mut(&key)
    }

    pub fn current_form(&self) -> Option<&FormSession> {
        self.forms.get(&self.page_key()?)
    }

    pub fn current_form_mut(&mut self) -> Option<&mut FormSession> {
        let key = self.page_key()?;
        self.forms.get_mut(&key)
    }

    /// Reset per-page UI state after navigation and make sure the page
    /// the reader landed on has its session. Chat transcripts and form
    /// answers created earlier are left alone.
    pub fn sync_page_state(&mut self, skip_blank_tokens: bool) {
        self.form_focus = FormFocus::default();
        self.form_scroll = 0;
        self.audio_scroll = 0;
        self.chat_input.clear();
        self.status.clear();

        let View::Page(pos) = self.engine.view() else {
            return;
        };
        let key = (pos.chapter, pos.page);
        match self.book.page(pos.chapter, pos.page) {
            Some(Page::Chatbot { .. }) => {
                self.chats
                    .entry(key)
                    .or_insert_with(|| ChatSession::new(skip_blank_tokens));
            }
            Some(Page::Form { title, .. }) => {
                let chapter_title = &self.book.chapters[pos.chapter].title;
                let submitted =
                    self.submitted_forms
                        .contains(&self.book.id, chapter_title, title);
                let session = if submitted {
                    FormSession::already_submitted()
                } else {
                    FormSession::new()
                };
                self.forms.entry(key).or_insert(session);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::{Chapter, ChatbotConfig};
    use pretty_assertions::assert_eq;

    fn book() -> Book {
        Book::new("b", "B").add_chapter(
            Chapter::new("One")
                .add_page(Page::text("<p>x</p>"))
                .add_page(Page::Chatbot {
                    config: ChatbotConfig::default(),
                })
                .add_page(Page::Form {
                    title: "Survey".to_string(),
                    fields: Vec::new(),
                }),
        )
    }

    #[test]
    fn input_edits_at_the_cursor_with_multibyte_text() {
        let mut input = InputState::default();
        for c in "héllo".chars() {
            input.insert_char(c);
        }
        input.move_start();
        input.move_right();
        input.delete_char_forward();
        assert_eq!(input.text, "hllo");

        input.move_end();
        input.delete_char();
        assert_eq!(input.text, "hll");
        assert_eq!(input.cursor, 3);
    }

    #[test]
    fn status_line_tracks_error_flag() {
        let mut status = StatusLine::default();
        status.set_error("bad");
        assert!(status.is_error);
        status.set_message("ok");
        assert!(!status.is_error);
        status.clear();
        assert!(status.message.is_none());
    }

    #[test]
    fn sync_creates_sessions_for_interactive_pages() {
        let mut state = AppState::new(book(), ReaderSettings::default());
        state.engine.jump_to_chapter(0);
        state.engine.next();
        state.sync_page_state(false);
        assert!(state.current_chat().is_some());
        assert!(state.current_form().is_none());

        state.engine.next();
        state.sync_page_state(false);
        assert!(state.current_form().is_some());
    }

    #[test]
    fn sync_resumes_submitted_forms_as_locked() {
        let mut state = AppState::new(book(), ReaderSettings::default());
        state.submitted_forms.mark("b", "One", "Survey");
        state.engine.jump_to_chapter(0);
        state.engine.next();
        state.engine.next();
        state.sync_page_state(false);
        assert!(state.current_form().unwrap().is_submitted());
    }

    #[test]
    fn sync_clears_page_ui_but_keeps_sessions() {
        let mut state = AppState::new(book(), ReaderSettings::default());
        state.engine.jump_to_chapter(0);
        state.engine.next();
        state.sync_page_state(false);
        state.chat_input.insert_char('x');
        state.form_focus.field = 2;

        state.engine.next();
        state.sync_page_state(false);
        assert!(state.chat_input.is_empty());
        assert_eq!(state.form_focus, FormFocus::default());
        // The chat session from the previous page survives.
        assert!(state.chats.contains_key(&(0, 1)));
    }
}
