//! JSON preview of the built document

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the pretty-printed document, scrollable with j/k
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Preview ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let json = match &app.state.document {
        Some(doc) => serde_json::to_string_pretty(doc)
            .unwrap_or_else(|e| format!("serialization failed: {e}")),
        None => "No document built yet.".to_string(),
    };

    let lines: Vec<Line> = json.lines().map(|l| Line::from(l.to_string())).collect();
    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((app.state.preview_scroll, 0));
    frame.render_widget(paragraph, area);
}
