//! UI module for rendering the TUI

mod components;
mod field_renderer;
mod form;
mod layout;
mod preview;

pub use form::ACTION_BUTTONS;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let (header_area, main_area) = layout::create_layout(area);
    layout::draw_header(frame, header_area, app);

    match app.state.current_view {
        View::Form => form::draw(frame, main_area, app),
        View::Preview => preview::draw(frame, main_area, app),
    }

    layout::draw_status_bar(frame, app);

    // Dialogs overlay whatever view is active
    if let Some(dialog) = &app.state.export_dialog {
        components::render_export_dialog(frame, dialog);
    }
    if let Some(error) = app.state.current_error() {
        components::render_error_dialog(frame, error);
    }
}
