//! Chatbot page: transcript plus a single-line message input

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::layout::{line_with_cursor, wrap_text};
use crate::app::state::AppState;
use crate::book::Page;
use crate::chat::{ChatSession, Role};
use crate::theme::Theme;

const INPUT_HEIGHT: u16 = 3;

/// Draw the discussion page for the current chapter.
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let Some(pos) = state.engine.position() else {
        return;
    };
    let Some(Page::Chatbot { config }) = state.book.page(pos.chapter, pos.page) else {
        return;
    };
    let Some(session) = state.chats.get(&(pos.chapter, pos.page)) else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(INPUT_HEIGHT)])
        .split(area);

    let title = config.title.as_deref().unwrap_or("Discussion");
    draw_transcript(frame, chunks[0], session, title, state.tick, theme);
    draw_input(frame, chunks[1], state, session, theme);
}

fn draw_transcript(
    frame: &mut Frame,
    area: Rect,
    session: &ChatSession,
    title: &str,
    tick: u64,
    theme: &Theme,
) {
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg_primary));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let width = inner.width.saturating_sub(2) as usize;
    let mut lines: Vec<Line> = Vec::new();

    for message in session.messages() {
        if message.content.is_empty() {
            continue;
        }
        let (name, name_style) = match message.role {
            Role::User => (
                "You",
                Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD),
            ),
            Role::Assistant => (
                "Guide",
                Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
            ),
        };
        lines.push(Line::from(Span::styled(name, name_style)));
        for text in wrap_text(&message.content, width) {
            lines.push(Line::from(Span::styled(
                format!("  {text}"),
                Style::default().fg(theme.fg_primary),
            )));
        }
        lines.push(Line::from(""));
    }

    if session.awaiting_reply() {
        let dots = ".".repeat(1 + (tick / 8 % 3) as usize);
        lines.push(Line::from(vec![
            Span::styled(
                "Guide",
                Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  thinking{dots}"),
                Style::default().fg(theme.fg_muted).add_modifier(Modifier::ITALIC),
            ),
        ]));
    }

    if let Some(error) = session.last_error() {
        lines.push(Line::from(Span::styled(
            format!("\u{26a0} Reply failed: {error}"),
            Style::default().fg(theme.error),
        )));
    }

    // Stay pinned to the newest message.
    let visible = inner.height as usize;
    let skip = lines.len().saturating_sub(visible);
    let visible_lines: Vec<Line> = lines.into_iter().skip(skip).collect();
    frame.render_widget(Paragraph::new(visible_lines), inner);
}

fn draw_input(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    session: &ChatSession,
    theme: &Theme,
) {
    let generating = session.is_generating();
    let border = if generating { theme.border } else { theme.border_focused };
    let block = Block::default()
        .title(" Your message ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(theme.bg_primary));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let line = if generating {
        Line::from(Span::styled(
            "Waiting for the reply to finish...",
            Style::default().fg(theme.fg_muted).add_modifier(Modifier::ITALIC),
        ))
    } else {
        line_with_cursor(
            &state.chat_input.text,
            state.chat_input.cursor,
            Style::default().fg(theme.fg_primary),
            theme,
        )
    };
    frame.render_widget(Paragraph::new(line), inner);
}
