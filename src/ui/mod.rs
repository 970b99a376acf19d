//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod overview;
mod splash;

use crate::app::App;
use crate::state::View;
use components::{render_error_dialog, render_success_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Splash takes the whole screen
    if let View::Splash = app.state.current_view {
        if let Some(splash_state) = &app.splash_state {
            splash::draw(frame, area, splash_state, &app.state.event_name);
        }
        return;
    }

    // Draw the main layout with sidebar
    let (sidebar_area, main_area) = layout::create_layout(area);
    layout::draw_sidebar(frame, sidebar_area, app);

    match app.state.current_view {
        View::Overview => overview::draw(frame, main_area, app),
        View::Register => forms::draw_registration(frame, main_area, app),
        View::Splash => {}
    }

    layout::draw_status_bar(frame, app);

    // Modal overlays, error on top
    if app.state.registration.success_visible {
        render_success_dialog(frame, &app.state.event_name, app.controller.last_receipt());
    }
    if let Some(error) = app.state.current_error() {
        render_error_dialog(frame, error);
    }
}
