//! Column strips for text pages.
//!
//! Page HTML is rendered to plain lines, wrapped to the column width, and
//! stacked into viewport-height bands laid side by side. The strip's pixel
//! width is then measured back through [`column_count`] so the pagination
//! engine sees the same geometry a print view would report.

use tracing::warn;

use super::column_count;
use crate::settings::{FontFamily, ReaderSettings};

/// Gap between adjacent columns, in pixels.
pub const COLUMN_GAP_PX: f32 = 2.0;

const MIN_TEXT_COLS: u16 = 8;
const MIN_TEXT_ROWS: u16 = 2;

/// Character grid available to a text page at the current settings.
///
/// Font size scales the grid: a larger font leaves fewer cells per line
/// and fewer lines per screen, just as it would shrink a print viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnGrid {
    pub text_cols: u16,
    pub text_rows: u16,
}

/// Derive the text grid from the drawable area and reader settings.
pub fn grid_for(area_width: u16, area_height: u16, settings: &ReaderSettings) -> ColumnGrid {
    let width = area_width.max(1);
    let height = area_height.max(1);

    let scale = 16.0 / f32::from(settings.font_size.max(1));
    let family_factor = FontFamily::Serif.advance_em() / settings.font_family.advance_em();
    let cols = (f32::from(width) * scale * family_factor).floor() as u16;
    let rows = (f32::from(height) * scale * (1.8 / settings.line_height.max(0.1))).floor() as u16;

    ColumnGrid {
        text_cols: cols.clamp(MIN_TEXT_COLS.min(width), width),
        text_rows: rows.clamp(MIN_TEXT_ROWS.min(height), height),
    }
}

/// Render page HTML to plain lines wrapped at the column width. Falls back
/// to the raw text when the HTML cannot be rendered.
pub fn html_to_lines(html: &str, width_cols: u16) -> Vec<String> {
    let width = usize::from(width_cols.max(1));
    let text = match html2text::from_read(html.as_bytes(), width) {
        Ok(text) => text,
        Err(err) => {
            warn!("html rendering failed, showing raw content: {err}");
            html.to_string()
        }
    };
    let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    lines
}

/// A text page laid out as a horizontal strip of equal-width columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStrip {
    lines: Vec<String>,
    rows_per_column: usize,
    grid: ColumnGrid,
    count: usize,
}

/// Lay out page HTML on the given grid and measure the resulting strip.
pub fn lay_out(html: &str, grid: ColumnGrid, settings: &ReaderSettings) -> ColumnStrip {
    let lines = html_to_lines(html, grid.text_cols);
    let rows_per_column = usize::from(grid.text_rows.max(1));
    let bands = lines.len().div_ceil(rows_per_column).max(1);

    let advance = settings.advance_px();
    let viewport_px = f32::from(grid.text_cols) * advance;
    let strip_px = bands as f32 * viewport_px + (bands as f32 - 1.0) * COLUMN_GAP_PX;
    let count = column_count(viewport_px, strip_px, COLUMN_GAP_PX);

    ColumnStrip {
        lines,
        rows_per_column,
        grid,
        count,
    }
}

impl ColumnStrip {
    /// Columns in the strip, always at least one.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn grid(&self) -> ColumnGrid {
        self.grid
    }

    /// Lines belonging to one column. Out-of-range columns are empty.
    pub fn column_lines(&self, column: usize) -> &[String] {
        let start = column.saturating_mul(self.rows_per_column);
        if start >= self.lines.len() {
            return &[];
        }
        let end = (start + self.rows_per_column).min(self.lines.len());
        &self.lines[start..end]
    }
}
