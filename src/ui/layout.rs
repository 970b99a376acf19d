//! Layout components (sidebar, status bar)

use super::components::{render_sidebar_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::platform::{BACK_SHORTCUT, NEXT_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Create the main layout with sidebar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20), // Sidebar
            Constraint::Min(0),     // Main content
        ])
        .split(area);

    // Reserve bottom line for status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(chunks[1]);

    let sidebar_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(chunks[0]);

    (sidebar_chunks[0], main_chunks[0])
}

/// Draw the sidebar with boxed buttons, highlighting the current view
pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let mut constraints = vec![Constraint::Min(0)];
    constraints.extend(View::SIDEBAR.iter().map(|_| Constraint::Length(BUTTON_HEIGHT)));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (idx, view) in View::SIDEBAR.iter().enumerate() {
        let is_selected = app.state.current_view == *view;
        render_sidebar_button(frame, chunks[idx + 1], view.label(), is_selected);
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![Span::raw(" ")];
    spans.push(Span::styled(
        get_view_hints(app.state.current_view),
        Style::default().fg(Color::Black),
    ));

    if let Some(msg) = &app.state.status_message {
        let color = if app.controller.state().is_success() {
            Color::Green
        } else {
            Color::White
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.as_str(), Style::default().fg(color)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(view: View) -> String {
    match view {
        View::Splash => "Press any key to skip".to_string(),
        View::Overview => "Enter:register  q:quit".to_string(),
        View::Register => format!(
            "Tab:next field  ←/→:choose  Space:toggle  {NEXT_SHORTCUT}:next  {BACK_SHORTCUT}:back  {SUBMIT_SHORTCUT}:submit  Esc:overview"
        ),
    }
}
