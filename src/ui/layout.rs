//! Layout components (header, status bar)

use crate::app::App;
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into header, content and (implicit) status bar rows
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the header line with the view tabs
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let tab = |label: &str, active: bool| {
        if active {
            Span::styled(
                format!(" {label} "),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!(" {label} "), Style::default().fg(Color::DarkGray))
        }
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " nerdm-tui ",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("│"),
        tab("Form", app.state.current_view == View::Form),
        tab("Preview", app.state.current_view == View::Preview),
    ]));
    frame.render_widget(header, area);
}

/// Draw the bottom status bar: status or key help on the left,
/// vocabulary warning on the right
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let bar = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let left = match &app.state.status_message {
        Some(message) => Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Green),
        )),
        None => help_line(app),
    };
    frame.render_widget(Paragraph::new(left), bar);

    if app.state.vocab_degraded() {
        let warning = " vocabulary offline: theme is free text ";
        let width = warning.len() as u16;
        if bar.width > width {
            let right = Rect {
                x: bar.x + bar.width - width,
                width,
                ..bar
            };
            frame.render_widget(
                Paragraph::new(Span::styled(warning, Style::default().fg(Color::Yellow))),
                right,
            );
        }
    }
}

fn help_line(app: &App) -> Line<'static> {
    let key = |k: &str| Span::styled(k.to_string(), Style::default().fg(Color::Cyan));
    let spans = match app.state.current_view {
        View::Form => vec![
            Span::raw(" "),
            key("Tab"),
            Span::raw(": next field  "),
            key(crate::platform::SUBMIT_SHORTCUT),
            Span::raw(": validate & preview  "),
            key("Ctrl+C"),
            Span::raw(": quit"),
        ],
        View::Preview => vec![
            Span::raw(" "),
            key("Enter"),
            Span::raw(": export  "),
            key("Esc"),
            Span::raw(": back to form  "),
            key("j/k"),
            Span::raw(": scroll"),
        ],
    };
    Line::from(spans).style(Style::default().fg(Color::DarkGray))
}
