//! Cover pages: the book cover and in-chapter covers

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::state::AppState;
use crate::book::Page;
use crate::theme::Theme;

/// Draw the book-level cover from the book's metadata.
pub fn draw_book(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let book = &state.book;

    let mut lines = vec![
        Line::from(Span::styled(
            book.title.clone(),
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "\u{2500}".repeat(rule_width(&book.title)),
            Style::default().fg(theme.border),
        )),
        Line::from(""),
        Line::from(Span::styled(
            book.author.clone(),
            Style::default().fg(theme.fg_secondary),
        )),
    ];
    if book.year > 0 {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            book.year.to_string(),
            Style::default().fg(theme.fg_muted),
        )));
    }

    render_centered(frame, area, lines, theme);
}

/// Draw a chapter cover page. These carry their own title and mark the
/// start of a chapter inside the page flow.
pub fn draw_chapter(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let Some(pos) = state.engine.position() else {
        return;
    };
    let Some(Page::Cover { title, .. }) = state.book.page(pos.chapter, pos.page) else {
        return;
    };

    let lines = vec![
        Line::from(Span::styled(
            format!("CHAPTER {}", pos.chapter + 1),
            Style::default().fg(theme.fg_muted),
        )),
        Line::from(""),
        Line::from(Span::styled(
            title.clone(),
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "\u{2500}".repeat(rule_width(title)),
            Style::default().fg(theme.border),
        )),
    ];

    render_centered(frame, area, lines, theme);
}

fn render_centered(frame: &mut Frame, area: Rect, lines: Vec<Line>, theme: &Theme) {
    frame.render_widget(
        Paragraph::new("").style(Style::default().bg(theme.bg_primary)),
        area,
    );

    let height = lines.len() as u16;
    let top = area.height.saturating_sub(height) / 2;
    let target = Rect {
        x: area.x,
        y: area.y + top,
        width: area.width,
        height: height.min(area.height),
    };
    let para = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(para, target);
}

/// Width of the decorative rule under a title, within reason.
fn rule_width(title: &str) -> usize {
    title.chars().count().clamp(8, 40)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rule_tracks_the_title_between_bounds() {
        assert_eq!(rule_width("ab"), 8);
        assert_eq!(rule_width("a ten char"), 10);
        assert_eq!(rule_width(&"x".repeat(100)), 40);
    }
}
