//! Text pages: prose rendered one column at a time
//!
//! The renderer doubles as the layout pass. Every frame lays the page out
//! on the grid the current area and settings produce; when the engine is
//! waiting on a measurement, the strip's column count is committed back
//! under the token of this pass. Navigation between frames reads whatever
//! count was committed last.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::state::AppState;
use crate::book::Page;
use crate::layout::columns::{ColumnGrid, grid_for, lay_out};
use crate::theme::Theme;

/// Draw the current text page's visible column.
pub fn draw(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let Some(pos) = state.engine.position() else {
        return;
    };
    let Some(Page::Text { content }) = state.book.page(pos.chapter, pos.page) else {
        return;
    };

    let block = Block::default()
        .title(" Reading ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg_primary));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width < 4 || inner.height < 2 {
        return;
    }

    let grid = grid_for(inner.width.saturating_sub(2), inner.height, &state.settings);
    let strip = lay_out(content, grid, &state.settings);

    if state.engine.needs_measure() {
        let token = state.engine.measure_token();
        state.engine.commit_columns(token, strip.count());
    }

    // The commit may have moved the column (a backward arrival lands on
    // the last one), so re-read the position before picking lines.
    let Some(pos) = state.engine.position() else {
        return;
    };
    let column = pos.column.min(strip.count() - 1);

    let lines: Vec<Line> = strip
        .column_lines(column)
        .iter()
        .map(|l| Line::from(Span::styled(l.clone(), Style::default().fg(theme.fg_primary))))
        .collect();
    frame.render_widget(Paragraph::new(lines), column_area(inner, grid));

    draw_turn_markers(frame, inner, column, strip.count(), theme);
}

/// Rect the column's text occupies, centered horizontally.
fn column_area(inner: Rect, grid: ColumnGrid) -> Rect {
    let width = grid.text_cols.min(inner.width);
    let left = inner.width.saturating_sub(width) / 2;
    Rect {
        x: inner.x + left,
        y: inner.y,
        width,
        height: inner.height,
    }
}

/// Faint markers at the side edges when more columns continue there.
fn draw_turn_markers(frame: &mut Frame, inner: Rect, column: usize, count: usize, theme: &Theme) {
    let style = Style::default().fg(theme.fg_muted);
    let mid_y = inner.y + inner.height / 2;
    if column > 0 {
        frame.render_widget(
            Paragraph::new(Span::styled("\u{25c2}", style)),
            Rect { x: inner.x, y: mid_y, width: 1, height: 1 },
        );
    }
    if column + 1 < count {
        frame.render_widget(
            Paragraph::new(Span::styled("\u{25b8}", style)),
            Rect { x: inner.x + inner.width - 1, y: mid_y, width: 1, height: 1 },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn column_area_centers_the_grid() {
        let inner = Rect::new(1, 1, 80, 20);
        let grid = ColumnGrid { text_cols: 60, text_rows: 18 };
        let area = column_area(inner, grid);
        assert_eq!(area.width, 60);
        assert_eq!(area.x, 1 + 10);
        assert_eq!(area.height, 20);
    }

    #[test]
    fn column_area_never_exceeds_the_inner_rect() {
        let inner = Rect::new(0, 0, 30, 10);
        let grid = ColumnGrid { text_cols: 45, text_rows: 9 };
        let area = column_area(inner, grid);
        assert_eq!(area.width, 30);
        assert_eq!(area.x, 0);
    }
}
