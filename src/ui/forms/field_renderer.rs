//! Field rendering for the registration form

use crate::state::{FieldFeedback, FieldKind, FormField};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one field: bordered input plus a feedback line
pub const FIELD_HEIGHT: u16 = 4;

/// Border color: feedback wins over focus
fn border_color(feedback: &FieldFeedback, is_active: bool) -> Color {
    match feedback {
        FieldFeedback::Error(_) => Color::Red,
        FieldFeedback::Valid => Color::Green,
        FieldFeedback::None if is_active => Color::Cyan,
        FieldFeedback::None => Color::DarkGray,
    }
}

fn placeholder(field: &FormField) -> &'static str {
    match field.kind {
        FieldKind::Text => "(required)",
        _ => "",
    }
}

/// Draw a form field with its validation message underneath
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(area);

    let display_value = field.display_value();
    let (text, text_style) = if display_value.is_empty() && !is_active {
        (placeholder(field).to_string(), Style::default().fg(Color::DarkGray))
    } else if is_active {
        (display_value, Style::default().fg(Color::Cyan))
    } else {
        (display_value, Style::default())
    };

    let mut spans = vec![Span::styled(text, text_style)];
    if is_active && field.is_text() {
        spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
    }

    let mut title_style = Style::default().fg(border_color(&field.feedback, is_active));
    if is_active {
        title_style = title_style.add_modifier(Modifier::BOLD);
    }

    let block = Block::default()
        .title(Span::styled(format!(" {} ", field.label), title_style))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(&field.feedback, is_active)));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), chunks[0]);

    let message = field.feedback.message();
    if !message.is_empty() {
        let color = if field.feedback.is_error() {
            Color::Red
        } else {
            Color::Green
        };
        let feedback = Paragraph::new(Span::styled(
            format!(" {message}"),
            Style::default().fg(color),
        ));
        frame.render_widget(feedback, chunks[1]);
    }
}
