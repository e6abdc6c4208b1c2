//! Application state and event handling

pub mod input;
pub mod state;

use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;

use crate::book::{Book, FieldValue, FormField, Page};
use crate::chat::{ChatClient, ChatEvent, run_exchange};
use crate::config::Config;
use crate::config::session::{BookSession, Session};
use crate::form::FormClient;
use crate::reader::View;
use crate::ui;
use input::Action;
use state::{AppState, FormFocus};

/// One streaming chat exchange in progress.
struct ActiveChat {
    /// Page the transcript belongs to
    key: (usize, usize),
    rx: mpsc::Receiver<ChatEvent>,
    cancel: CancellationToken,
}

/// One form submission awaiting its result.
struct PendingForm {
    key: (usize, usize),
    rx: oneshot::Receiver<Result<(), String>>,
}

/// The main application
pub struct App {
    /// Application configuration
    config: Config,

    /// Current application state
    state: AppState,

    /// Persisted reading positions
    session: Session,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,

    chat_client: ChatClient,
    form_client: FormClient,

    active_chat: Option<ActiveChat>,
    pending_form: Option<PendingForm>,
}

impl App {
    /// Create a new application instance for the given book.
    pub fn new(config: Config, book: Book) -> Result<Self> {
        let terminal = Self::setup_terminal()?;

        let session = Session::load().unwrap_or_else(|err| {
            tracing::warn!("failed to load session, starting fresh: {err:#}");
            Session::default()
        });

        let mut state = AppState::new(book, config.settings);
        if let Some(saved) = session.book(&state.book.id) {
            if saved.at_index {
                state.engine.jump_to_index();
            } else if !saved.at_cover {
                state.engine.restore_position(saved.chapter, saved.page);
            }
        }
        state.sync_page_state(config.skip_blank_tokens);

        let chat_client = ChatClient::new(&config.server_url);
        let form_client = FormClient::new(&config.server_url);

        Ok(Self {
            config,
            state,
            session,
            terminal,
            chat_client,
            form_client,
            active_chat: None,
            pending_form: None,
        })
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        loop {
            let theme = self.config.active_theme();
            self.terminal.draw(|frame| {
                ui::draw(frame, &mut self.state, &theme);
            })?;

            self.drain_chat_events();
            self.drain_form_result();

            // Handle events
            if event::poll(std::time::Duration::from_millis(16))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key) {
                            break;
                        }
                    }
                    Event::Resize(_, _) => {
                        self.state.engine.invalidate_columns();
                    }
                    _ => {}
                }
            }

            self.state.tick = self.state.tick.wrapping_add(1);
        }

        self.save_session();
        self.restore_terminal()?;
        Ok(())
    }

    fn save_session(&mut self) {
        self.session.last_book_id = Some(self.state.book.id.clone());
        *self.session.book_mut(&self.state.book.id) =
            BookSession::from_view(self.state.engine.view());
        if let Err(err) = self.session.save() {
            tracing::warn!("failed to save session: {err:#}");
        }
    }

    /// Handle a key press, returns true if should exit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if let Some(action) = input::key_with_modifier_to_action(key.code, key.modifiers) {
            return self.perform(action);
        }

        match self.state.engine.view() {
            View::Index => self.handle_index_key(key.code),
            View::BookCover => self.handle_reading_key(key.code),
            View::Page(_) => match self.state.current_page().map(Page::kind_label) {
                Some("chatbot") => {
                    self.handle_chat_key(key.code);
                    false
                }
                Some("form") => {
                    self.handle_form_key(key.code);
                    false
                }
                Some("audio") => self.handle_audio_key(key.code),
                _ => self.handle_reading_key(key.code),
            },
        }
    }

    fn handle_reading_key(&mut self, key: KeyCode) -> bool {
        match input::reading_key_to_action(key) {
            Some(action) => self.perform(action),
            None => false,
        }
    }

    fn handle_index_key(&mut self, key: KeyCode) -> bool {
        let last = self.state.book.chapters.len().saturating_sub(1);
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.index_selected = self.state.index_selected.saturating_sub(1);
                false
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.index_selected = (self.state.index_selected + 1).min(last);
                false
            }
            KeyCode::Enter => {
                let chapter = self.state.index_selected;
                self.navigate(|state| state.engine.jump_to_chapter(chapter));
                false
            }
            other => self.handle_reading_key(other),
        }
    }

    fn handle_audio_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Down | KeyCode::Char('j') => {
                // The renderer clamps against the transcript length.
                self.state.audio_scroll += 1;
                false
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.audio_scroll = self.state.audio_scroll.saturating_sub(1);
                false
            }
            other => self.handle_reading_key(other),
        }
    }

    /// Keys on a chatbot page. Typed characters belong to the input line;
    /// the arrows turn pages only while it is empty.
    fn handle_chat_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter => self.send_chat(),
            KeyCode::Char(c) => self.state.chat_input.insert_char(c),
            KeyCode::Backspace => self.state.chat_input.delete_char(),
            KeyCode::Delete => self.state.chat_input.delete_char_forward(),
            KeyCode::Home => self.state.chat_input.move_start(),
            KeyCode::End => self.state.chat_input.move_end(),
            KeyCode::Left => {
                if self.state.chat_input.is_empty() {
                    self.perform(Action::PrevPage);
                } else {
                    self.state.chat_input.move_left();
                }
            }
            KeyCode::Right => {
                if self.state.chat_input.is_empty() {
                    self.perform(Action::NextPage);
                } else {
                    self.state.chat_input.move_right();
                }
            }
            KeyCode::Esc => self.state.chat_input.clear(),
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        let Some(pos) = self.state.engine.position() else {
            return;
        };
        let Some(Page::Form { fields, .. }) = self.state.book.page(pos.chapter, pos.page) else {
            return;
        };
        let field_count = fields.len();
        let option_counts: Vec<usize> = fields.iter().map(|f| f.options().len()).collect();
        let focused = fields.get(self.state.form_focus.field).cloned();

        match key {
            KeyCode::Down => {
                self.state.form_focus =
                    focus_down(self.state.form_focus, &option_counts, field_count);
            }
            KeyCode::Up => {
                self.state.form_focus = focus_up(self.state.form_focus, &option_counts);
            }
            KeyCode::Left => {
                self.perform(Action::PrevPage);
            }
            KeyCode::Right => {
                self.perform(Action::NextPage);
            }
            KeyCode::Enter => self.form_enter(focused.as_ref(), field_count),
            KeyCode::Char(c) => {
                if let Some(field) = &focused {
                    self.edit_form_field(field, Some(c));
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = &focused {
                    self.edit_form_field(field, None);
                }
            }
            _ => {}
        }
    }

    /// Enter on a form: restart after submission, submit on the submit
    /// row, choose on an option row, otherwise move to the next field.
    fn form_enter(&mut self, focused: Option<&FormField>, field_count: usize) {
        if let Some(session) = self.state.current_form_mut() {
            if session.is_submitted() {
                session.start_new_response();
                self.state.form_focus = FormFocus::default();
                return;
            }
        }

        let focus = self.state.form_focus;
        if focus.field >= field_count {
            self.submit_form();
            return;
        }

        match focused {
            Some(FormField::Select { id, options, .. }) => {
                let (id, option) = (id.clone(), options.get(focus.option).cloned());
                if let (Some(option), Some(session)) = (option, self.state.current_form_mut()) {
                    session.set_field(&id, FieldValue::Text(option));
                }
            }
            Some(FormField::Checkboxes { id, options, .. }) => {
                let (id, option) = (id.clone(), options.get(focus.option).cloned());
                if let (Some(option), Some(session)) = (option, self.state.current_form_mut()) {
                    session.toggle_choice(&id, &option);
                }
            }
            _ => {
                self.state.form_focus = FormFocus {
                    field: (focus.field + 1).min(field_count),
                    option: 0,
                };
            }
        }
    }

    /// Append a character to (or, on `None`, shorten) the focused text or
    /// number field. Number fields only accept numeric characters and are
    /// stored as numbers once the buffer parses as one.
    fn edit_form_field(&mut self, field: &FormField, c: Option<char>) {
        let id = field.id().to_string();
        let numeric = matches!(field, FormField::Number { .. });
        if !matches!(field, FormField::Text { .. } | FormField::Number { .. }) {
            return;
        }

        let Some(session) = self.state.current_form_mut() else {
            return;
        };
        let mut text = match session.value(&id) {
            Some(FieldValue::Text(s)) => s.clone(),
            Some(FieldValue::Number(n)) => number_text(*n),
            _ => String::new(),
        };
        match c {
            Some(c) if numeric => {
                if !is_number_char(c, &text) {
                    return;
                }
                text.push(c);
            }
            Some(c) => text.push(c),
            None => {
                text.pop();
            }
        }

        let value = if numeric {
            match text.parse::<f64>() {
                Ok(n) => FieldValue::Number(n),
                Err(_) => FieldValue::Text(text),
            }
        } else {
            FieldValue::Text(text)
        };
        session.set_field(&id, value);
    }

    /// Apply a navigation or settings action, returns true if should exit
    fn perform(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::NextPage | Action::Select => self.navigate(|state| state.engine.next()),
            Action::PrevPage | Action::Back => self.navigate(|state| state.engine.previous()),
            Action::OpenIndex => self.navigate(|state| state.engine.jump_to_index()),
            Action::OpenCover => self.navigate(|state| state.engine.jump_to_cover()),
            Action::FontBigger => {
                if self.state.settings.increase_font() {
                    self.settings_changed(format!("Font size {}", self.state.settings.font_size));
                }
            }
            Action::FontSmaller => {
                if self.state.settings.decrease_font() {
                    self.settings_changed(format!("Font size {}", self.state.settings.font_size));
                }
            }
            Action::CycleFamily => {
                self.state.settings.cycle_family();
                self.settings_changed(self.state.settings.font_family.label().to_string());
            }
            Action::LineLooser => {
                if self.state.settings.loosen_line_height() {
                    self.settings_changed(format!(
                        "Line height {:.1}",
                        self.state.settings.line_height
                    ));
                }
            }
            Action::LineTighter => {
                if self.state.settings.tighten_line_height() {
                    self.settings_changed(format!(
                        "Line height {:.1}",
                        self.state.settings.line_height
                    ));
                }
            }
            Action::Up | Action::Down => {}
        }
        false
    }

    /// Run a navigation step, then retire any chat stream whose page the
    /// reader just left and sync per-page state.
    fn navigate(&mut self, step: impl FnOnce(&mut AppState)) {
        step(&mut self.state);
        self.retire_stale_chat();
        self.state.sync_page_state(self.config.skip_blank_tokens);
    }

    /// A layout-affecting setting changed: the current column count can
    /// no longer be trusted, so ask for a fresh measurement.
    fn settings_changed(&mut self, message: String) {
        self.state.engine.invalidate_columns();
        self.state.status.set_message(message);
    }

    /// Cancel the in-flight stream when the reader has navigated away
    /// from its page. The transcript keeps whatever tokens arrived.
    fn retire_stale_chat(&mut self) {
        let current = self.state.page_key();
        let stale = self
            .active_chat
            .as_ref()
            .is_some_and(|active| current != Some(active.key));
        if !stale {
            return;
        }
        if let Some(active) = self.active_chat.take() {
            active.cancel.cancel();
            if let Some(session) = self.state.chats.get_mut(&active.key) {
                session.apply(ChatEvent::Done);
            }
        }
    }

    /// Start a streaming exchange for the current chatbot page.
    fn send_chat(&mut self) {
        let Some(pos) = self.state.engine.position() else {
            return;
        };
        let key = (pos.chapter, pos.page);
        let Some(Page::Chatbot { config }) = self.state.book.page(pos.chapter, pos.page) else {
            return;
        };
        let config = config.clone();
        let chapter_title = self.state.current_chapter_title().to_string();
        let input = self.state.chat_input.text.clone();

        let Some(session) = self.state.chats.get_mut(&key) else {
            return;
        };
        let Some(request) = session.begin_send(&input, &config, &chapter_title) else {
            return;
        };
        self.state.chat_input.clear();

        let (tx, rx) = mpsc::channel(64);
        let cancel = CancellationToken::new();
        tokio::spawn(run_exchange(
            self.chat_client.clone(),
            request,
            tx,
            cancel.clone(),
        ));
        self.active_chat = Some(ActiveChat { key, rx, cancel });
    }

    /// Feed streamed chat events into the transcript they belong to.
    fn drain_chat_events(&mut self) {
        use mpsc::error::TryRecvError;

        let Some(active) = &mut self.active_chat else {
            return;
        };
        let mut finished = false;
        loop {
            match active.rx.try_recv() {
                Ok(event) => {
                    let terminal = matches!(event, ChatEvent::Done | ChatEvent::Failed(_));
                    if let Some(session) = self.state.chats.get_mut(&active.key) {
                        session.apply(event);
                    }
                    if terminal {
                        finished = true;
                        break;
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    // The exchange ended without a terminal event, which
                    // only happens on cancellation. Unlock the session.
                    if let Some(session) = self.state.chats.get_mut(&active.key) {
                        session.apply(ChatEvent::Done);
                    }
                    finished = true;
                    break;
                }
            }
        }
        if finished {
            self.active_chat = None;
        }
    }

    /// Send the current form's answers to the platform.
    fn submit_form(&mut self) {
        if self.pending_form.is_some() {
            return;
        }
        let Some(pos) = self.state.engine.position() else {
            return;
        };
        let key = (pos.chapter, pos.page);
        let Some(Page::Form { title, .. }) = self.state.book.page(pos.chapter, pos.page) else {
            return;
        };
        let form_title = title.clone();
        let chapter_title = self.state.current_chapter_title().to_string();
        let book_id = self.state.book.id.clone();

        let Some(session) = self.state.forms.get_mut(&key) else {
            return;
        };
        let Some(submission) = session.begin_submit(&book_id, &chapter_title, &form_title) else {
            return;
        };

        let (tx, rx) = oneshot::channel();
        let client = self.form_client.clone();
        tokio::spawn(async move {
            let result = client.submit(&submission).await.map_err(|e| e.to_string());
            let _ = tx.send(result);
        });
        self.pending_form = Some(PendingForm { key, rx });
    }

    fn drain_form_result(&mut self) {
        use oneshot::error::TryRecvError;

        let Some(mut pending) = self.pending_form.take() else {
            return;
        };
        match pending.rx.try_recv() {
            Ok(result) => self.finish_form_submit(pending.key, result),
            Err(TryRecvError::Empty) => self.pending_form = Some(pending),
            Err(TryRecvError::Closed) => {
                self.finish_form_submit(pending.key, Err("submission task failed".to_string()));
            }
        }
    }

    fn finish_form_submit(&mut self, key: (usize, usize), result: Result<(), String>) {
        let accepted = result.is_ok();
        if let Some(session) = self.state.forms.get_mut(&key) {
            session.complete_submit(result);
        }
        if !accepted {
            self.state.status.set_error("Submission failed, answers kept");
            return;
        }

        let chapter_title = self
            .state
            .book
            .chapter(key.0)
            .map(|c| c.title.clone())
            .unwrap_or_default();
        let form_title = match self.state.book.page(key.0, key.1) {
            Some(Page::Form { title, .. }) => title.clone(),
            _ => String::new(),
        };
        self.state
            .submitted_forms
            .mark(&self.state.book.id, &chapter_title, &form_title);
        self.state.status.set_message("Response recorded");
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

/// Move form focus one row down, descending into option rows. Focus one
/// past the last field is the submit row.
fn focus_down(focus: FormFocus, option_counts: &[usize], field_count: usize) -> FormFocus {
    let options = option_counts.get(focus.field).copied().unwrap_or(0);
    if focus.option + 1 < options {
        FormFocus {
            option: focus.option + 1,
            ..focus
        }
    } else {
        FormFocus {
            field: (focus.field + 1).min(field_count),
            option: 0,
        }
    }
}

/// Mirror of [`focus_down`]: entering a field from below lands on its
/// last option row.
fn focus_up(focus: FormFocus, option_counts: &[usize]) -> FormFocus {
    if focus.option > 0 {
        return FormFocus {
            option: focus.option - 1,
            ..focus
        };
    }
    if focus.field == 0 {
        return focus;
    }
    let field = focus.field - 1;
    let options = option_counts.get(field).copied().unwrap_or(0);
    FormFocus {
        field,
        option: options.saturating_sub(1),
    }
}

/// Characters accepted while typing into a number field.
fn is_number_char(c: char, current: &str) -> bool {
    c.is_ascii_digit()
        || (c == '.' && !current.contains('.'))
        || (c == '-' && current.is_empty())
}

/// Editing buffer for a stored numeric answer.
fn number_text(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn focus(field: usize, option: usize) -> FormFocus {
        FormFocus { field, option }
    }

    #[test]
    fn focus_walks_down_through_options_then_fields() {
        // Field 0 plain, field 1 with three options, then the submit row.
        let counts = [0, 3];
        let mut f = focus(0, 0);
        f = focus_down(f, &counts, 2);
        assert_eq!(f, focus(1, 0));
        f = focus_down(f, &counts, 2);
        assert_eq!(f, focus(1, 1));
        f = focus_down(f, &counts, 2);
        assert_eq!(f, focus(1, 2));
        f = focus_down(f, &counts, 2);
        assert_eq!(f, focus(2, 0));
        // The submit row is the floor.
        assert_eq!(focus_down(f, &counts, 2), focus(2, 0));
    }

    #[test]
    fn focus_walks_up_into_the_last_option_row() {
        let counts = [0, 3];
        let mut f = focus(2, 0);
        f = focus_up(f, &counts);
        assert_eq!(f, focus(1, 2));
        f = focus_up(f, &counts);
        assert_eq!(f, focus(1, 1));
        f = focus_up(f, &counts);
        assert_eq!(f, focus(1, 0));
        f = focus_up(f, &counts);
        assert_eq!(f, focus(0, 0));
        assert_eq!(focus_up(f, &counts), focus(0, 0));
    }

    #[test]
    fn number_fields_accept_one_dot_and_a_leading_minus() {
        assert!(is_number_char('4', ""));
        assert!(is_number_char('.', "3"));
        assert!(!is_number_char('.', "3.1"));
        assert!(is_number_char('-', ""));
        assert!(!is_number_char('-', "2"));
        assert!(!is_number_char('x', ""));
    }

    #[test]
    fn number_buffers_round_trip_whole_values() {
        assert_eq!(number_text(4.0), "4");
        assert_eq!(number_text(2.5), "2.5");
    }
}
