//! UI rendering components

pub mod audio_page;
pub mod chat_page;
pub mod cover_page;
pub mod footer;
pub mod form_page;
pub mod index_page;
pub mod layout;
pub mod text_page;

use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::Style,
    widgets::Paragraph,
};

use crate::app::state::AppState;
use crate::book::Page;
use crate::reader::View;
use crate::theme::Theme;

/// Main draw function: header, one page body, footer.
pub fn draw(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let area = frame.area();
    frame.render_widget(
        Paragraph::new("").style(Style::default().bg(theme.bg_primary)),
        area,
    );

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(footer::FOOTER_HEIGHT),
    ])
    .split(area);

    layout::draw_header(frame, chunks[0], state, theme);
    draw_body(frame, chunks[1], state, theme);
    footer::draw(frame, chunks[2], state, theme);
}

fn draw_body(
    frame: &mut Frame,
    area: ratatui::layout::Rect,
    state: &mut AppState,
    theme: &Theme,
) {
    match state.engine.view() {
        View::BookCover => cover_page::draw_book(frame, area, state, theme),
        View::Index => index_page::draw(frame, area, state, theme),
        View::Page(_) => {
            // Each renderer re-checks the page kind, so dispatch only
            // needs the label.
            let kind = state.current_page().map(Page::kind_label);
            match kind {
                Some("text") => text_page::draw(frame, area, state, theme),
                Some("chatbot") => chat_page::draw(frame, area, state, theme),
                Some("form") => form_page::draw(frame, area, state, theme),
                Some("audio") => audio_page::draw(frame, area, state, theme),
                Some("cover") => cover_page::draw_chapter(frame, area, state, theme),
                Some("index") => index_page::draw(frame, area, state, theme),
                _ => {}
            }
        }
    }
}
