//! Shared chrome and drawing helpers

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use textwrap::{Options, wrap};

use crate::app::state::AppState;
use crate::reader::View;
use crate::theme::Theme;

/// Draw the one-line header: reading context on the left, book identity
/// on the right.
pub fn draw_header(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    frame.render_widget(
        Paragraph::new("").style(Style::default().bg(theme.bg_secondary)),
        area,
    );

    let book = &state.book;
    let (left, right) = match state.engine.view() {
        View::BookCover => (
            Line::from(Span::styled(
                format!(" {} ", book.title),
                Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
            )),
            format!("{} ", book.author),
        ),
        View::Index => (
            Line::from(Span::styled(" Index ", Style::default().fg(theme.fg_primary))),
            format!("{} ", book.title),
        ),
        View::Page(pos) => {
            let chapter_title = book.chapter(pos.chapter).map_or("", |c| c.title.as_str());
            (
                Line::from(vec![
                    Span::styled(
                        format!(" {} ", chapter_title),
                        Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("· Chapter {} ", pos.chapter + 1),
                        Style::default().fg(theme.fg_muted),
                    ),
                ]),
                format!("{} ", book.title),
            )
        }
    };

    let right_width = (right.chars().count() as u16).min(area.width);
    let chunks = Layout::horizontal([Constraint::Min(0), Constraint::Length(right_width)])
        .split(area);

    frame.render_widget(
        Paragraph::new(left).style(Style::default().bg(theme.bg_secondary)),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(right)
            .style(Style::default().fg(theme.fg_secondary).bg(theme.bg_secondary))
            .alignment(Alignment::Right),
        chunks[1],
    );
}

/// Create a centered rectangle with the given percentage of width and height
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

/// Word-wrap text to a width, keeping blank lines.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return text.lines().map(str::to_string).collect();
    }
    let opts = Options::new(width);
    text.lines()
        .flat_map(|line| {
            if line.trim().is_empty() {
                vec![String::new()]
            } else {
                wrap(line, &opts).into_iter().map(|s| s.to_string()).collect()
            }
        })
        .collect()
}

/// Build a line with a visible block cursor at a character position.
pub fn line_with_cursor(
    text: &str,
    cursor_pos: usize,
    base_style: Style,
    theme: &Theme,
) -> Line<'static> {
    let chars: Vec<char> = text.chars().collect();
    let mut spans = Vec::new();

    if cursor_pos > 0 {
        let before: String = chars.iter().take(cursor_pos).collect();
        spans.push(Span::styled(before, base_style));
    }

    let cursor_char = chars.get(cursor_pos).copied().unwrap_or(' ');
    let cursor_style =
        Style::default().fg(theme.bg_primary).bg(theme.cursor).add_modifier(Modifier::BOLD);
    spans.push(Span::styled(cursor_char.to_string(), cursor_style));

    if cursor_pos + 1 < chars.len() {
        let after: String = chars.iter().skip(cursor_pos + 1).collect();
        spans.push(Span::styled(after, base_style));
    }

    Line::from(spans)
}

/// Draw a vertical scrollbar indicator
pub fn draw_scrollbar(
    frame: &mut Frame,
    x: u16,
    y: u16,
    height: u16,
    scroll_offset: usize,
    total_lines: usize,
    theme: &Theme,
) {
    if total_lines == 0 || height == 0 {
        return;
    }

    let height = height as usize;

    let visible_ratio = (height as f64 / total_lines as f64).min(1.0);
    let thumb_height = ((height as f64 * visible_ratio).ceil() as usize).max(1);

    let max_scroll = total_lines.saturating_sub(height);
    let scroll_ratio = if max_scroll == 0 {
        0.0
    } else {
        scroll_offset as f64 / max_scroll as f64
    };
    let thumb_top = ((height - thumb_height) as f64 * scroll_ratio).round() as usize;

    for i in 0..height {
        let in_thumb = i >= thumb_top && i < thumb_top + thumb_height;
        let ch = if in_thumb { "█" } else { "░" };
        let style = if in_thumb {
            Style::default().fg(theme.accent_secondary)
        } else {
            Style::default().fg(theme.bg_tertiary)
        };

        frame.render_widget(
            Paragraph::new(ch).style(style),
            Rect { x, y: y.saturating_add(i as u16), width: 1, height: 1 },
        );
    }
}

/// Keep a selected row inside the visible window, returning the adjusted
/// scroll offset.
pub fn follow_selection(scroll: usize, selected: usize, visible: usize) -> usize {
    if visible == 0 {
        return 0;
    }
    if selected < scroll {
        selected
    } else if selected >= scroll + visible {
        selected + 1 - visible
    } else {
        scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn centered_rect_is_inside_the_parent() {
        let parent = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(80, 50, parent);
        assert!(rect.x >= parent.x && rect.y >= parent.y);
        assert!(rect.right() <= parent.right() && rect.bottom() <= parent.bottom());
        assert_eq!(rect.width, 80);
        assert_eq!(rect.height, 20);
    }

    #[test]
    fn wrap_text_respects_the_width() {
        let lines = wrap_text("one two three four five six seven", 10);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
    }

    #[test]
    fn wrap_text_keeps_blank_lines() {
        let lines = wrap_text("first\n\nsecond", 20);
        assert_eq!(lines, vec!["first".to_string(), String::new(), "second".to_string()]);
    }

    #[test]
    fn cursor_at_start_splits_into_two_spans() {
        let theme = Theme::default();
        let line = line_with_cursor("hello", 0, Style::default(), &theme);
        assert_eq!(line.spans.len(), 2);
    }

    #[test]
    fn cursor_at_end_renders_a_trailing_block() {
        let theme = Theme::default();
        let line = line_with_cursor("hello", 5, Style::default(), &theme);
        assert_eq!(line.spans.len(), 2);
        assert_eq!(line.spans[1].content, " ");
    }

    #[test]
    fn cursor_in_the_middle_splits_into_three_spans() {
        let theme = Theme::default();
        let line = line_with_cursor("hello", 2, Style::default(), &theme);
        assert_eq!(line.spans.len(), 3);
    }

    #[test]
    fn follow_selection_scrolls_both_directions() {
        assert_eq!(follow_selection(5, 2, 4), 2);
        assert_eq!(follow_selection(0, 7, 4), 4);
        assert_eq!(follow_selection(2, 3, 4), 2);
    }
}
