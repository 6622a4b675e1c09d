//! Export destination dialog

use super::base::{render_dialog, DialogConfig};
use crate::state::ExportDialog;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Render the export-path input dialog
pub fn render_export_dialog(frame: &mut Frame, dialog: &ExportDialog) {
    let hint = vec![
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(": write file  "),
        Span::styled(
            "Esc",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(": cancel"),
    ];

    let body = vec![Line::from(vec![
        Span::styled(dialog.path.clone(), Style::default().fg(Color::Cyan)),
        Span::styled("▌", Style::default().fg(Color::Cyan)),
    ])];

    render_dialog(
        frame,
        DialogConfig {
            title: "Export record to",
            title_color: Color::Green,
            border_color: Color::Green,
            body,
            hint: Some(hint),
            max_width: 70,
        },
    );
}
