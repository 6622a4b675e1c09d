//! Field rendering utilities for the record form

use crate::nerdm::FieldFailure;
use crate::schema::{FieldKind, FieldSpec};
use crate::state::FormState;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw one form field from its spec and the live form state.
/// A validation failure colors the border red and is shown in the title.
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    spec: &FieldSpec,
    form: &FormState,
    is_active: bool,
    failure: Option<&FieldFailure>,
) {
    let border_style = if failure.is_some() {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    let marker = if spec.required { " *" } else { "" };
    let title = match failure {
        Some(failure) => format!(" {}{} — {} ", spec.label, marker, failure.reason.message()),
        None => format!(" {}{} ", spec.label, marker),
    };

    let cursor = if is_active { "▌" } else { "" };
    let content = match spec.kind {
        FieldKind::Multiline => {
            let value = form.text(&spec.name);
            let mut lines: Vec<Line> = value.lines().map(|l| Line::from(l.to_string())).collect();
            if is_active {
                match lines.last_mut() {
                    Some(last) if !value.ends_with('\n') => {
                        last.spans.push(Span::styled(cursor, text_style));
                    }
                    _ => lines.push(Line::from(Span::styled(cursor, text_style))),
                }
            } else if lines.is_empty() {
                lines.push(placeholder_line());
            }
            Paragraph::new(lines)
        }
        FieldKind::MultiChoice => {
            let entries = form.list(&spec.name).join(", ");
            let draft = if is_active { form.draft.as_str() } else { "" };
            let mut spans = vec![Span::styled(entries.clone(), text_style)];
            if !draft.is_empty() {
                if !entries.is_empty() {
                    spans.push(Span::raw(", "));
                }
                spans.push(Span::styled(draft.to_string(), text_style));
            }
            if is_active {
                spans.push(Span::styled(cursor, text_style));
            } else if entries.is_empty() {
                spans = vec![placeholder_span()];
            }
            Paragraph::new(Line::from(spans))
        }
        FieldKind::Choice if spec.allowed_values.is_some() => {
            let value = form.text(&spec.name);
            let display = if is_active {
                format!("◂ {value} ▸")
            } else {
                value.to_string()
            };
            Paragraph::new(Line::from(Span::styled(display, text_style)))
        }
        _ => {
            let value = form.text(&spec.name);
            if value.is_empty() && !is_active {
                Paragraph::new(placeholder_line())
            } else {
                Paragraph::new(Line::from(vec![
                    Span::styled(value.to_string(), text_style),
                    Span::styled(cursor, text_style),
                ]))
            }
        }
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

fn placeholder_span() -> Span<'static> {
    Span::styled("(empty)", Style::default().fg(Color::DarkGray))
}

fn placeholder_line() -> Line<'static> {
    Line::from(placeholder_span())
}
