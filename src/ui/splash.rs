//! Splash screen rendering with ASCII art banner

use crate::state::SplashState;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const BANNER: [&str; 6] = [
    "███████╗██╗   ██╗███████╗███╗   ██╗████████╗",
    "██╔════╝██║   ██║██╔════╝████╗  ██║╚══██╔══╝",
    "█████╗  ██║   ██║█████╗  ██╔██╗ ██║   ██║   ",
    "██╔══╝  ╚██╗ ██╔╝██╔══╝  ██║╚██╗██║   ██║   ",
    "███████╗ ╚████╔╝ ███████╗██║ ╚████║   ██║   ",
    "╚══════╝  ╚═══╝  ╚══════╝╚═╝  ╚═══╝   ╚═╝   ",
];

/// Banner lines followed by the event name
fn build_banner(event_name: &str) -> Vec<Line<'static>> {
    let style = Style::default().fg(Color::Cyan);
    let mut lines: Vec<Line> = BANNER
        .iter()
        .map(|row| Line::from(Span::styled(*row, style)))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        event_name.to_string(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    lines
}

/// Draw the splash screen
pub fn draw(frame: &mut Frame, area: Rect, splash_state: &SplashState, event_name: &str) {
    let lines = build_banner(event_name);

    let banner_height = lines.len() as u16;
    let banner_width = BANNER[0]
        .chars()
        .count()
        .max(event_name.chars().count()) as u16;

    // Centered, shifted up by the scroll offset (can go above the screen)
    let base_y = area.y as i32 + (area.height.saturating_sub(banner_height)) as i32 / 2;
    let y_pos = base_y - splash_state.scroll_offset as i32;
    let x = area.x + (area.width.saturating_sub(banner_width)) / 2;

    let lines_off_top = if y_pos < 0 { (-y_pos) as usize } else { 0 };
    if lines_off_top >= lines.len() {
        return;
    }

    let visible_lines: Vec<Line> = lines.into_iter().skip(lines_off_top).collect();
    let visible_height = visible_lines.len() as u16;
    let render_y = (y_pos.max(area.y as i32)) as u16;

    let banner_area = Rect {
        x,
        y: render_y,
        width: banner_width.min(area.width),
        height: visible_height.min(area.height.saturating_sub(render_y.saturating_sub(area.y))),
    };
    frame.render_widget(
        Paragraph::new(visible_lines).alignment(ratatui::layout::Alignment::Center),
        banner_area,
    );

    // Hint at the bottom, only before the banner starts moving
    if splash_state.scroll_offset < 1.0 && area.height >= 2 {
        let hint = "Press any key to skip";
        let hint_width = hint.len() as u16;
        let hint_area = Rect {
            x: area.x + (area.width.saturating_sub(hint_width)) / 2,
            y: area.y + area.height - 2,
            width: hint_width.min(area.width),
            height: 1,
        };
        let hint_line = Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray)));
        frame.render_widget(Paragraph::new(hint_line), hint_area);
    }
}
