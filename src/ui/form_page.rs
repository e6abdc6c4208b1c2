//! Form page: reader response fields, a submit row, and the locked
//! post-submission view

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::layout::{follow_selection, line_with_cursor, wrap_text};
use crate::app::state::AppState;
use crate::book::{FieldValue, FormField, Page};
use crate::form::FormSession;
use crate::theme::Theme;

/// Draw the form for the current page.
pub fn draw(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let Some(pos) = state.engine.position() else {
        return;
    };
    let Some(Page::Form { title, fields }) = state.book.page(pos.chapter, pos.page) else {
        return;
    };
    let Some(session) = state.forms.get(&(pos.chapter, pos.page)) else {
        return;
    };

    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_primary));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width < 8 || inner.height < 2 {
        return;
    }

    if session.is_submitted() {
        draw_submitted(frame, inner, theme);
        return;
    }

    let width = inner.width.saturating_sub(4) as usize;
    let focus = state.form_focus;
    let editable = session.is_editable();
    let value_style = if editable {
        Style::default().fg(theme.fg_primary)
    } else {
        Style::default().fg(theme.fg_muted)
    };

    let mut lines: Vec<Line> = Vec::new();
    let mut focus_line = 0;

    for (idx, field) in fields.iter().enumerate() {
        let focused = focus.field == idx;
        lines.push(label_line(field.label(), focused, theme));
        if focused && field.options().is_empty() {
            focus_line = lines.len();
        }
        match field {
            FormField::Text { id, placeholder, multiline, .. } => {
                push_text_rows(
                    &mut lines,
                    session.value(id),
                    placeholder.as_deref(),
                    *multiline,
                    focused && editable,
                    width,
                    value_style,
                    theme,
                );
            }
            FormField::Number { id, placeholder, .. } => {
                push_text_rows(
                    &mut lines,
                    session.value(id),
                    Some(placeholder.as_deref().unwrap_or("number")),
                    false,
                    focused && editable,
                    width,
                    value_style,
                    theme,
                );
            }
            FormField::Select { id, options, .. } => {
                let chosen = session.value(id).and_then(FieldValue::as_text);
                for (opt_idx, option) in options.iter().enumerate() {
                    let row_focused = focused && focus.option == opt_idx;
                    if row_focused {
                        focus_line = lines.len();
                    }
                    let marked = chosen == Some(option.as_str());
                    lines.push(option_line(option, marked, row_focused, "\u{25cf}", "\u{25cb}", theme));
                }
            }
            FormField::Checkboxes { id, options, .. } => {
                let choices = session.value(id).and_then(FieldValue::as_choices).unwrap_or(&[]);
                for (opt_idx, option) in options.iter().enumerate() {
                    let row_focused = focused && focus.option == opt_idx;
                    if row_focused {
                        focus_line = lines.len();
                    }
                    let marked = choices.iter().any(|c| c == option);
                    lines.push(option_line(option, marked, row_focused, "\u{2611}", "\u{2610}", theme));
                }
            }
        }
        lines.push(Line::from(""));
    }

    if let Some(error) = session.error() {
        lines.push(Line::from(Span::styled(
            format!("  \u{26a0} {error}"),
            Style::default().fg(theme.error),
        )));
        lines.push(Line::from(""));
    }

    let on_submit = focus.field >= fields.len();
    if on_submit {
        focus_line = lines.len();
    }
    lines.push(submit_line(session, on_submit, theme));

    let visible = inner.height as usize;
    state.form_scroll = follow_selection(state.form_scroll, focus_line, visible);
    let start = state.form_scroll.min(lines.len().saturating_sub(1));
    let end = (start + visible).min(lines.len());
    let visible_lines: Vec<Line> = lines.into_iter().skip(start).take(end - start).collect();
    frame.render_widget(Paragraph::new(visible_lines), inner);
}

fn label_line(label: &str, focused: bool, theme: &Theme) -> Line<'static> {
    let marker_style = Style::default().fg(theme.accent_primary);
    let label_style = if focused {
        Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD)
    };
    Line::from(vec![
        Span::styled(if focused { " \u{25b8} " } else { "   " }, marker_style),
        Span::styled(label.to_string(), label_style),
    ])
}

#[allow(clippy::too_many_arguments)]
fn push_text_rows(
    lines: &mut Vec<Line<'static>>,
    value: Option<&FieldValue>,
    placeholder: Option<&str>,
    multiline: bool,
    editing: bool,
    width: usize,
    value_style: Style,
    theme: &Theme,
) {
    let text = value_text(value).unwrap_or_default();

    if text.is_empty() && !editing {
        let hint = placeholder.unwrap_or("your answer").to_string();
        lines.push(Line::from(Span::styled(
            format!("     {hint}"),
            Style::default().fg(theme.fg_muted).add_modifier(Modifier::ITALIC),
        )));
        return;
    }

    let rows = if multiline {
        wrap_text(&text, width.saturating_sub(5).max(8))
    } else {
        vec![text]
    };
    let last = rows.len().saturating_sub(1);
    for (i, row) in rows.into_iter().enumerate() {
        let padded = format!("     {row}");
        if editing && i == last {
            let cursor = padded.chars().count();
            lines.push(line_with_cursor(&padded, cursor, value_style, theme));
        } else {
            lines.push(Line::from(Span::styled(padded, value_style)));
        }
    }
}

fn option_line(
    option: &str,
    marked: bool,
    focused: bool,
    on_icon: &str,
    off_icon: &str,
    theme: &Theme,
) -> Line<'static> {
    let icon = if marked { on_icon } else { off_icon };
    let style = if focused {
        Style::default().fg(theme.bg_primary).bg(theme.accent_primary).add_modifier(Modifier::BOLD)
    } else if marked {
        Style::default().fg(theme.accent_secondary)
    } else {
        Style::default().fg(theme.fg_secondary)
    };
    Line::from(Span::styled(format!("     {icon} {option}"), style))
}

fn submit_line(session: &FormSession, focused: bool, theme: &Theme) -> Line<'static> {
    let label = if session.is_submitting() {
        " Submitting... "
    } else {
        " Submit response "
    };
    let style = if session.is_submitting() {
        Style::default().fg(theme.fg_muted).bg(theme.bg_tertiary)
    } else if focused {
        Style::default().fg(theme.bg_primary).bg(theme.accent_primary).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.fg_secondary).bg(theme.bg_tertiary)
    };
    Line::from(vec![Span::raw("   "), Span::styled(label.to_string(), style)])
}

fn draw_submitted(frame: &mut Frame, area: Rect, theme: &Theme) {
    let lines = vec![
        Line::from(Span::styled(
            "\u{2713} Response recorded",
            Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Your answers were saved. Thank you.",
            Style::default().fg(theme.fg_secondary),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] write another response",
            Style::default().fg(theme.fg_muted),
        )),
    ];

    let height = lines.len() as u16;
    let top = area.height.saturating_sub(height) / 2;
    let target = Rect {
        x: area.x,
        y: area.y + top,
        width: area.width,
        height: height.min(area.height),
    };
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), target);
}

/// Text shown for a stored answer. Choice lists render through their own
/// option rows, never as text.
fn value_text(value: Option<&FieldValue>) -> Option<String> {
    match value? {
        FieldValue::Text(s) => Some(s.clone()),
        FieldValue::Number(n) => {
            if n.fract() == 0.0 {
                Some(format!("{}", *n as i64))
            } else {
                Some(n.to_string())
            }
        }
        FieldValue::Choices(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn whole_numbers_drop_the_fraction() {
        assert_eq!(value_text(Some(&FieldValue::Number(3.0))), Some("3".to_string()));
        assert_eq!(value_text(Some(&FieldValue::Number(2.5))), Some("2.5".to_string()));
    }

    #[test]
    fn choices_never_render_as_text() {
        let value = FieldValue::Choices(vec!["a".to_string()]);
        assert_eq!(value_text(Some(&value)), None);
        assert_eq!(value_text(None), None);
    }
}
