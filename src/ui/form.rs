//! Record form rendering

use super::components::{render_action_button, BUTTON_HEIGHT};
use super::field_renderer::draw_field;
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Height of one field row (borders + content)
const FIELD_HEIGHT: u16 = 3;

/// Labels of the action panel buttons, in selection order
pub const ACTION_BUTTONS: &[&str] = &["Submit", "Clear", "Quit"];

/// Draw the record form with the action panel on the right
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Form area
            Constraint::Length(22), // Action panel
        ])
        .split(area);

    draw_fields(frame, chunks[0], app);
    draw_action_panel(frame, chunks[1], app);
}

fn draw_fields(frame: &mut Frame, area: Rect, app: &App) {
    let on_actions = app.state.form.on_actions_row(&app.state.fields);
    let border_color = if on_actions {
        Color::DarkGray
    } else {
        Color::Cyan
    };

    let block = Block::default()
        .title(" NERDm Record ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let fields = &app.state.fields;
    let visible = (inner.height / FIELD_HEIGHT).max(1) as usize;
    let active = app.state.form.active_field.min(fields.len().saturating_sub(1));
    let start = scroll_start(active, fields.len(), visible);

    for (row, (index, spec)) in fields
        .iter()
        .enumerate()
        .skip(start)
        .take(visible)
        .enumerate()
    {
        let field_area = Rect {
            x: inner.x,
            y: inner.y + row as u16 * FIELD_HEIGHT,
            width: inner.width,
            height: FIELD_HEIGHT,
        };
        draw_field(
            frame,
            field_area,
            spec,
            &app.state.form,
            !on_actions && index == app.state.form.active_field,
            app.state.failure_for(&spec.name),
        );
    }
}

/// First visible field index, keeping the active field in the window
fn scroll_start(active: usize, total: usize, visible: usize) -> usize {
    if total <= visible {
        0
    } else if active + 1 > visible {
        (active + 1 - visible).min(total - visible)
    } else {
        0
    }
}

fn draw_action_panel(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.state.form.on_actions_row(&app.state.fields);
    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Actions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let constraints: Vec<Constraint> = ACTION_BUTTONS
        .iter()
        .map(|_| Constraint::Length(BUTTON_HEIGHT))
        .chain([Constraint::Min(0)])
        .collect();
    let button_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let accents = [Some(Color::Green), Some(Color::Yellow), Some(Color::Gray)];
    for (idx, label) in ACTION_BUTTONS.iter().enumerate() {
        render_action_button(
            frame,
            button_chunks[idx],
            label,
            is_focused && app.state.form.selected_button == idx,
            accents[idx],
        );
    }
}
