//! Audio page: interview header and a scrollable transcript

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::layout::draw_scrollbar;
use crate::app::state::AppState;
use crate::book::Page;
use crate::layout::columns::html_to_lines;
use crate::theme::Theme;

/// Draw the audio page: where the original plays audio, the terminal
/// shows the source and the transcript.
pub fn draw(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let Some(pos) = state.engine.position() else {
        return;
    };
    let Some(Page::Audio { url, content }) = state.book.page(pos.chapter, pos.page) else {
        return;
    };

    let block = Block::default()
        .title(" Interview ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg_primary));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 4 {
        return;
    }

    let header = vec![
        Line::from(Span::styled(
            "\u{266a} Audio source",
            Style::default().fg(theme.fg_muted),
        )),
        Line::from(Span::styled(format!("  {url}"), Style::default().fg(theme.info))),
        Line::from(""),
    ];
    let header_height = header.len() as u16;
    frame.render_widget(Paragraph::new(header), Rect { height: header_height, ..inner });

    // Transcript below, one column reserved for the scrollbar.
    let transcript_area = Rect {
        x: inner.x,
        y: inner.y + header_height,
        width: inner.width.saturating_sub(1),
        height: inner.height - header_height,
    };
    let width = transcript_area.width.saturating_sub(2);
    let lines = html_to_lines(content, width);

    let total = lines.len();
    let visible = transcript_area.height as usize;
    let max_scroll = total.saturating_sub(visible);
    state.audio_scroll = state.audio_scroll.min(max_scroll);

    let styled: Vec<Line> = lines
        .into_iter()
        .skip(state.audio_scroll)
        .take(visible)
        .map(|l| {
            if l.starts_with('#') {
                Line::from(Span::styled(
                    l,
                    Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(format!("  {l}"), Style::default().fg(theme.fg_primary)))
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(styled), transcript_area);

    if total > visible {
        draw_scrollbar(
            frame,
            inner.x + inner.width.saturating_sub(1),
            transcript_area.y,
            transcript_area.height,
            state.audio_scroll,
            total,
            theme,
        );
    }
}
