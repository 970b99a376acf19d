//! Button component for TUI

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render a generic button with border
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    is_selected: bool,
    is_enabled: bool,
) {
    render_action_button(frame, area, content, is_selected, is_enabled, None);
}

/// Render a sidebar navigation button
pub fn render_sidebar_button(frame: &mut Frame, area: Rect, label: &str, is_selected: bool) {
    render_button(frame, area, label, is_selected, true);
}

/// Render a form action button. `accent` colors an unfocused, enabled button
/// so the primary action stands out.
pub fn render_action_button(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    is_selected: bool,
    is_enabled: bool,
    accent: Option<Color>,
) {
    let idle = accent.unwrap_or(Color::DarkGray);

    let border_style = if is_selected && is_enabled {
        Style::default().fg(Color::Cyan)
    } else if is_enabled {
        Style::default().fg(idle)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text_style = if is_selected && is_enabled {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else if !is_enabled {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(accent.unwrap_or(Color::Reset))
    };

    let paragraph = Paragraph::new(format!(" {label} "))
        .style(text_style)
        .alignment(Alignment::Center);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}
