//! Reading footer: progress gauge, position label, and key hints

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::state::AppState;
use crate::book::Page;
use crate::reader::{View, chapter_progress, position_label};
use crate::theme::Theme;

/// Height of the footer in lines
pub const FOOTER_HEIGHT: u16 = 3;

/// Draw the footer: a separator, the chapter progress row, and a hint or
/// status row.
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    if area.height < FOOTER_HEIGHT {
        return;
    }

    let separator = Line::from(Span::styled(
        "\u{2500}".repeat(area.width as usize),
        Style::default().fg(theme.border),
    ));
    frame.render_widget(Paragraph::new(separator), Rect::new(area.x, area.y, area.width, 1));

    draw_progress_row(frame, Rect::new(area.x, area.y + 1, area.width, 1), state, theme);
    draw_hint_row(frame, Rect::new(area.x, area.y + 2, area.width, 1), state, theme);
}

fn draw_progress_row(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let view = state.engine.view();
    let Some(progress) = chapter_progress(&state.book, view) else {
        // Front matter has no chapter to measure against.
        let label = if state.book.year > 0 {
            format!(" {} · {} ", state.book.author, state.book.year)
        } else {
            format!(" {} ", state.book.author)
        };
        let para = Paragraph::new(Span::styled(label, Style::default().fg(theme.fg_muted)))
            .alignment(Alignment::Center);
        frame.render_widget(para, area);
        return;
    };

    let label = position_label(&state.book, view).unwrap_or_default();
    let label_width = (label.chars().count() as u16 + 3).min(area.width);
    let chunks =
        Layout::horizontal([Constraint::Min(10), Constraint::Length(label_width)]).split(area);

    let bar_width = chunks[0].width.saturating_sub(2) as usize;
    let filled = filled_cells(bar_width, progress);
    let bar = Line::from(vec![
        Span::raw(" "),
        Span::styled("█".repeat(filled), Style::default().fg(theme.accent_primary)),
        Span::styled(
            "░".repeat(bar_width - filled),
            Style::default().fg(theme.bg_tertiary),
        ),
    ]);
    frame.render_widget(Paragraph::new(bar), chunks[0]);

    let label_para = Paragraph::new(Span::styled(
        format!("{label} "),
        Style::default().fg(theme.fg_secondary),
    ))
    .alignment(Alignment::Right);
    frame.render_widget(label_para, chunks[1]);
}

fn draw_hint_row(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    // A status message takes the row over from the hints.
    if let Some(message) = &state.status.message {
        let style = if state.status.is_error {
            Style::default().fg(theme.error)
        } else {
            Style::default().fg(theme.fg_muted)
        };
        frame.render_widget(Paragraph::new(Span::styled(format!(" {message}"), style)), area);
        return;
    }

    let mut spans = vec![Span::raw(" ")];
    for (key, desc) in hints_for(state) {
        spans.push(Span::styled(format!("[{key}]"), Style::default().fg(theme.fg_muted)));
        spans.push(Span::styled(
            format!(" {desc}  "),
            Style::default().fg(theme.fg_secondary),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Key hints for the current view, shown left to right.
fn hints_for(state: &AppState) -> Vec<(&'static str, &'static str)> {
    match state.engine.view() {
        View::BookCover => vec![("→", "begin"), ("i", "index"), ("q", "quit")],
        View::Index => vec![
            ("j/k", "move"),
            ("Enter", "open chapter"),
            ("→", "first page"),
            ("q", "quit"),
        ],
        View::Page(pos) => match state.book.page(pos.chapter, pos.page) {
            Some(Page::Chatbot { .. }) => vec![
                ("Enter", "send"),
                ("←/→", "turn page"),
                ("Ctrl-q", "quit"),
            ],
            Some(Page::Form { .. }) => vec![
                ("↑/↓", "field"),
                ("Enter", "choose/submit"),
                ("←/→", "turn page"),
            ],
            Some(Page::Audio { .. }) => vec![
                ("j/k", "scroll"),
                ("←/→", "turn page"),
                ("q", "quit"),
            ],
            _ => vec![
                ("←/→", "turn page"),
                ("+/-", "font"),
                ("f", "family"),
                ("i", "index"),
                ("q", "quit"),
            ],
        },
    }
}

/// Cells to fill for a progress fraction, clamped to the bar.
fn filled_cells(width: usize, fraction: f32) -> usize {
    if width == 0 {
        return 0;
    }
    ((width as f32 * fraction).round() as usize).min(width)
}
