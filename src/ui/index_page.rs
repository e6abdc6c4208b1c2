//! Index page: the table of contents with chapter start pages

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::layout::follow_selection;
use crate::app::state::AppState;
use crate::book::Page;
use crate::theme::Theme;

/// Rows of chrome above the chapter list: title, spacer.
const LIST_TOP: u16 = 2;

/// Draw the table of contents. Rows are selectable with the selection
/// kept in view as it moves.
pub fn draw(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_primary));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height <= LIST_TOP {
        return;
    }

    let title = match &state.book.index {
        Some(Page::Index { title }) => title.as_str(),
        _ => "Index",
    };
    let title_para = Paragraph::new(Span::styled(
        title.to_string(),
        Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(title_para, Rect { height: 1, ..inner });

    let list_area = Rect {
        x: inner.x + 2,
        y: inner.y + LIST_TOP,
        width: inner.width.saturating_sub(4),
        height: inner.height - LIST_TOP,
    };
    let width = list_area.width as usize;
    let visible = list_area.height as usize;

    state.index_selected = state.index_selected.min(state.book.chapters.len().saturating_sub(1));
    state.index_scroll = follow_selection(state.index_scroll, state.index_selected, visible);

    let mut lines: Vec<Line> = Vec::new();
    for (idx, chapter) in state.book.chapters.iter().enumerate() {
        let row = leader_row(idx + 1, &chapter.title, state.book.chapter_start_page(idx), width);
        let style = if idx == state.index_selected {
            Style::default()
                .fg(theme.bg_primary)
                .bg(theme.accent_primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg_primary)
        };
        lines.push(Line::from(Span::styled(row, style)));
    }

    let start = state.index_scroll;
    let end = (start + visible).min(lines.len());
    let visible_lines: Vec<Line> = lines.into_iter().skip(start).take(end - start).collect();
    frame.render_widget(Paragraph::new(visible_lines), list_area);
}

/// One contents row: numbered title, dot leaders, start page.
fn leader_row(number: usize, title: &str, page: usize, width: usize) -> String {
    let left = format!("{number:>2}. {title}");
    let right = page.to_string();
    let used = left.chars().count() + right.chars().count() + 2;
    if width <= used {
        return format!("{left} {right}");
    }
    let dots = "\u{b7}".repeat(width - used);
    format!("{left} {dots} {right}")
}
