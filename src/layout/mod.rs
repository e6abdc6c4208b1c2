//! Pure layout measurement: column counts, visible-line windows, and form
//! field height estimation.
//!
//! Everything here is arithmetic over measured widths and heights. Nothing
//! touches the terminal, which keeps the reader's pagination decisions
//! testable without one.

pub mod columns;

use tracing::warn;

use crate::book::FormField;
use crate::settings::ReaderSettings;

/// Measures rendered text width in pixels. The terminal backend derives a
/// per-character advance from the reader settings; tests can supply fixed
/// advances directly.
pub trait TextMeasurer {
    fn text_width(&self, text: &str) -> f32;
}

/// Measurer for a uniform character grid.
#[derive(Debug, Clone, Copy)]
pub struct CellMeasurer {
    advance_px: f32,
}

impl CellMeasurer {
    pub fn new(settings: &ReaderSettings) -> Self {
        Self {
            advance_px: settings.advance_px(),
        }
    }

    pub fn with_advance(advance_px: f32) -> Self {
        Self { advance_px }
    }
}

impl TextMeasurer for CellMeasurer {
    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.advance_px
    }
}

/// Number of columns a text strip occupies.
///
/// Content that fits the viewport is a single column. Otherwise each extra
/// column adds one gap, so the strip width is `n * viewport + (n - 1) * gap`
/// and the count is recovered by rounding up. Degenerate inputs (zero or
/// negative viewport, non-finite widths) report a single column.
pub fn column_count(viewport_width: f32, scroll_width: f32, column_gap: f32) -> usize {
    if !viewport_width.is_finite() || !scroll_width.is_finite() || viewport_width <= 0.0 {
        warn!(
            viewport_width,
            scroll_width, "degenerate column measurement, assuming one column"
        );
        return 1;
    }
    if scroll_width <= viewport_width {
        return 1;
    }
    let count = ((scroll_width + column_gap) / (viewport_width + column_gap)).ceil();
    if count.is_finite() && count >= 1.0 {
        count as usize
    } else {
        1
    }
}

/// How many whole line boxes fit in the viewport, never fewer than one.
pub fn lines_per_viewport(viewport_height: f32, line_height: f32) -> usize {
    let per = (viewport_height / line_height.max(1.0)).floor();
    (per as usize).max(1)
}

/// The window of lines currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Visible<'a> {
    pub lines: &'a [String],
    pub has_more: bool,
    /// Total line count, windowed or not.
    pub total: usize,
}

/// Slice `lines` to the window starting at `line_offset` that fits the
/// viewport. Degenerate dimensions return everything rather than nothing,
/// so a bad measurement never blanks the page.
pub fn visible_lines<'a>(
    lines: &'a [String],
    viewport_height: f32,
    line_height: f32,
    line_offset: usize,
) -> Visible<'a> {
    if !viewport_height.is_finite()
        || !line_height.is_finite()
        || viewport_height <= 0.0
        || line_height <= 0.0
    {
        warn!(
            viewport_height,
            line_height, "degenerate viewport, showing all lines"
        );
        return Visible {
            lines,
            has_more: false,
            total: lines.len(),
        };
    }
    let per = lines_per_viewport(viewport_height, line_height);
    let start = line_offset.min(lines.len());
    let end = (start + per).min(lines.len());
    Visible {
        lines: &lines[start..end],
        has_more: end < lines.len(),
        total: lines.len(),
    }
}

/// Greedy word wrap: how many lines a label needs at the given width.
/// A word wider than the line still occupies one line rather than none.
fn label_lines(label: &str, measurer: &dyn TextMeasurer, width: f32) -> usize {
    let mut count = 0;
    let mut line = String::new();
    for word in label.split_whitespace() {
        let trial = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };
        if measurer.text_width(&trial) <= width || line.is_empty() {
            line = trial;
        } else {
            count += 1;
            line = word.to_string();
        }
    }
    if !line.is_empty() {
        count += 1;
    }
    count.max(1)
}

/// Estimated line-box height of one form field: wrapped label plus the
/// control rows plus a trailing spacer.
pub fn field_line_estimate(field: &FormField, measurer: &dyn TextMeasurer, width: f32) -> usize {
    let label = label_lines(field.label(), measurer, width);
    match field {
        FormField::Text { multiline, .. } => label + if *multiline { 3 } else { 1 } + 1,
        FormField::Number { .. } => label + 1 + 1,
        FormField::Select { options, .. } => label + 1 + options.len().max(1) + 1,
        FormField::Checkboxes { options, .. } => label + options.len().max(1) + 1,
    }
}

/// Bin form fields into page-sized groups without ever splitting a field.
/// A field taller than a whole page gets a page to itself.
pub fn paginate_form(
    fields: &[FormField],
    viewport_height: f32,
    line_height: f32,
    measurer: &dyn TextMeasurer,
    width: f32,
) -> Vec<Vec<FormField>> {
    let per_page = lines_per_viewport(viewport_height, line_height);
    let mut pages: Vec<Vec<FormField>> = Vec::new();
    let mut current: Vec<FormField> = Vec::new();
    let mut used = 0;

    for field in fields {
        let need = field_line_estimate(field, measurer, width);
        if used + need > per_page && !current.is_empty() {
            pages.push(std::mem::take(&mut current));
            used = 0;
        }
        current.push(field.clone());
        used += need.min(per_page);
    }
    if !current.is_empty() {
        pages.push(current);
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn unit_measurer() -> CellMeasurer {
        CellMeasurer::with_advance(1.0)
    }

    fn text_field(label: &str, multiline: bool) -> FormField {
        FormField::Text {
            id: "f".to_string(),
            label: label.to_string(),
            placeholder: None,
            multiline,
        }
    }

    #[test]
    fn column_count_is_one_when_content_fits() {
        assert_eq!(column_count(100.0, 100.0, 2.0), 1);
        assert_eq!(column_count(100.0, 40.0, 2.0), 1);
    }

    #[test]
    fn column_count_rounds_partial_columns_up() {
        // Strip of 250px across 100px columns with a 2px gap needs three.
        assert_eq!(column_count(100.0, 250.0, 2.0), 3);
    }

    #[test]
    fn column_count_recovers_exact_multiples_without_gap() {
        for k in 1..=6_usize {
            assert_eq!(column_count(80.0, 80.0 * k as f32, 0.0), k);
        }
    }

    #[test]
    fn column_count_recovers_gapped_strips() {
        // n columns of width w separated by g gaps measure n*w + (n-1)*g.
        let (w, g) = (120.0, 2.0);
        for n in 2..=5_usize {
            let strip = n as f32 * w + (n as f32 - 1.0) * g;
            assert_eq!(column_count(w, strip, g), n);
        }
    }

    #[test]
    fn column_count_survives_degenerate_input() {
        assert_eq!(column_count(0.0, 500.0, 2.0), 1);
        assert_eq!(column_count(-10.0, 500.0, 2.0), 1);
        assert_eq!(column_count(f32::NAN, 500.0, 2.0), 1);
        assert_eq!(column_count(100.0, f32::NAN, 2.0), 1);
    }

    #[test]
    fn visible_lines_windows_by_offset() {
        let lines: Vec<String> = (0..10).map(|i| format!("line {i}")).collect();
        // 50px tall at 16px per line shows three lines.
        let v = visible_lines(&lines, 50.0, 16.0, 0);
        assert_eq!(v.lines.len(), 3);
        assert!(v.has_more);
        assert_eq!(v.total, 10);

        let v = visible_lines(&lines, 50.0, 16.0, 8);
        assert_eq!(v.lines, &lines[8..10]);
        assert!(!v.has_more);
    }

    #[test]
    fn visible_lines_offset_past_end_is_empty() {
        let lines: Vec<String> = (0..4).map(|i| i.to_string()).collect();
        let v = visible_lines(&lines, 50.0, 16.0, 99);
        assert!(v.lines.is_empty());
        assert!(!v.has_more);
    }

    #[test]
    fn visible_lines_degenerate_viewport_shows_everything() {
        let lines: Vec<String> = (0..4).map(|i| i.to_string()).collect();
        for (h, lh) in [(0.0, 16.0), (-5.0, 16.0), (50.0, 0.0), (f32::NAN, 16.0)] {
            let v = visible_lines(&lines, h, lh, 2);
            assert_eq!(v.lines.len(), 4);
            assert!(!v.has_more);
        }
    }

    #[test]
    fn lines_per_viewport_floors_and_clamps() {
        assert_eq!(lines_per_viewport(50.0, 16.0), 3);
        assert_eq!(lines_per_viewport(10.0, 16.0), 1);
        // Sub-pixel line heights are treated as one pixel.
        assert_eq!(lines_per_viewport(5.0, 0.25), 5);
    }

    #[test]
    fn label_wraps_greedily() {
        let m = unit_measurer();
        // Ten chars per line: "aaaa bbbb" fits, adding "cccc" does not.
        assert_eq!(label_lines("aaaa bbbb cccc", &m, 10.0), 2);
        assert_eq!(label_lines("aaaa", &m, 10.0), 1);
        assert_eq!(label_lines("", &m, 10.0), 1);
        // A single oversized word still takes one line.
        assert_eq!(label_lines("abcdefghijklmnop", &m, 10.0), 1);
    }

    #[test]
    fn field_estimates_follow_control_shape() {
        let m = unit_measurer();
        // Short labels wrap to one line at width 40.
        assert_eq!(field_line_estimate(&text_field("Thoughts", false), &m, 40.0), 3);
        assert_eq!(field_line_estimate(&text_field("Thoughts", true), &m, 40.0), 5);

        let number = FormField::Number {
            id: "n".to_string(),
            label: "Rating".to_string(),
            placeholder: None,
            min: None,
            max: None,
        };
        assert_eq!(field_line_estimate(&number, &m, 40.0), 3);

        let select = FormField::Select {
            id: "s".to_string(),
            label: "Pick".to_string(),
            options: vec!["a".to_string(), "b".to_string(), "c".to_string()],
        };
        assert_eq!(field_line_estimate(&select, &m, 40.0), 6);

        let boxes = FormField::Checkboxes {
            id: "c".to_string(),
            label: "All".to_string(),
            options: vec!["x".to_string(), "y".to_string()],
        };
        assert_eq!(field_line_estimate(&boxes, &m, 40.0), 4);
    }

    #[test]
    fn paginate_form_never_splits_a_field() {
        let m = unit_measurer();
        let fields: Vec<FormField> = (0..6).map(|i| text_field(&format!("q{i}"), true)).collect();
        // Each multiline field needs 5 lines; a 128px viewport at 16px
        // line height holds 8, so two fields fit per page.
        let pages = paginate_form(&fields, 128.0, 16.0, &m, 40.0);
        assert_eq!(pages.len(), 3);
        for page in &pages {
            assert_eq!(page.len(), 2);
        }
        let flattened: Vec<FormField> = pages.into_iter().flatten().collect();
        assert_eq!(flattened, fields);
    }

    #[test]
    fn paginate_form_gives_oversized_fields_their_own_page() {
        let m = unit_measurer();
        let tall = FormField::Select {
            id: "s".to_string(),
            label: "Pick".to_string(),
            options: (0..20).map(|i| i.to_string()).collect(),
        };
        let fields = vec![text_field("a", false), tall.clone(), text_field("b", false)];
        let pages = paginate_form(&fields, 96.0, 16.0, &m, 40.0);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[1], vec![tall]);
    }

    #[test]
    fn paginate_form_handles_empty_field_lists() {
        let m = unit_measurer();
        assert!(paginate_form(&[], 100.0, 16.0, &m, 40.0).is_empty());
    }

    proptest! {
        #[test]
        fn label_lines_shrink_as_width_grows(
            words in proptest::collection::vec("[a-z]{1,8}", 1..20),
            width in 4.0_f32..40.0,
        ) {
            let m = unit_measurer();
            let label = words.join(" ");
            let narrow = label_lines(&label, &m, width);
            let wide = label_lines(&label, &m, width * 2.0);
            prop_assert!(wide <= narrow);
            prop_assert!(narrow >= 1);
        }

        #[test]
        fn paginate_form_preserves_every_field_in_order(
            labels in proptest::collection::vec("[a-z ]{1,30}", 0..12),
            viewport in 20.0_f32..200.0,
        ) {
            let m = unit_measurer();
            let fields: Vec<FormField> = labels
                .iter()
                .enumerate()
                .map(|(i, l)| FormField::Text {
                    id: format!("f{i}"),
                    label: l.clone(),
                    placeholder: None,
                    multiline: i % 2 == 0,
                })
                .collect();
            let pages = paginate_form(&fields, viewport, 16.0, &m, 24.0);
            let flattened: Vec<FormField> = pages.into_iter().flatten().collect();
            prop_assert_eq!(flattened, fields);
        }
    }
}
