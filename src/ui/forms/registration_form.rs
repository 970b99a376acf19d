//! Multi-step registration form rendering

use super::field_renderer::{draw_field, FIELD_HEIGHT};
use crate::app::App;
use crate::platform::{BACK_SHORTCUT, NEXT_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::{FormButton, RegistrationScreen, StepMarker};
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the registration form for the visible step
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let screen = &app.state.registration;

    let block = Block::default()
        .title(format!(" Register for {} ", app.state.event_name))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Progress indicator
            Constraint::Length(1),             // Spacer
            Constraint::Length(1),             // Step title
            Constraint::Min(0),                // Step content
            Constraint::Length(1),             // Notice
            Constraint::Length(BUTTON_HEIGHT), // Buttons
        ])
        .horizontal_margin(1)
        .split(inner);

    frame.render_widget(Paragraph::new(progress_line(screen)), chunks[0]);

    if let Some(step) = screen.current() {
        let title = Paragraph::new(Span::styled(
            format!("Step {} of {}: {}", screen.visible_step, screen.step_count(), step.title),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(title, chunks[2]);
    }

    if screen.is_review_visible() {
        draw_review(frame, chunks[3], screen);
    } else {
        draw_fields(frame, chunks[3], screen);
    }

    if let Some(notice) = &screen.notice {
        let notice = Paragraph::new(Span::styled(notice.as_str(), Style::default().fg(Color::Red)));
        frame.render_widget(notice, chunks[4]);
    }

    draw_buttons(frame, chunks[5], screen);
}

/// Step indicator, e.g. "✓ 1 Personal ── ● 2 Academic ── ○ 3 Review"
fn progress_line(screen: &RegistrationScreen) -> Line<'static> {
    let mut spans = Vec::new();
    for (idx, (step, marker)) in screen.steps.iter().zip(&screen.markers).enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" ── ", Style::default().fg(Color::DarkGray)));
        }
        let (symbol, style) = match marker {
            StepMarker::Completed => ("✓", Style::default().fg(Color::Green)),
            StepMarker::Active => (
                "●",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            StepMarker::Pending => ("○", Style::default().fg(Color::DarkGray)),
        };
        spans.push(Span::styled(
            format!("{symbol} {} {}", idx + 1, step.title),
            style,
        ));
    }
    Line::from(spans)
}

fn draw_fields(frame: &mut Frame, area: Rect, screen: &RegistrationScreen) {
    let Some(step) = screen.current() else {
        return;
    };

    let mut constraints: Vec<Constraint> = step
        .fields
        .iter()
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .collect();
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (idx, field) in step.fields.iter().enumerate() {
        draw_field(frame, chunks[idx], field, screen.active_field_index == idx);
    }
}

/// Summary of the entered data followed by the review step's own fields
fn draw_review(frame: &mut Frame, area: Rect, screen: &RegistrationScreen) {
    let field_count = screen.current().map(|s| s.fields.len()).unwrap_or(0);
    let summary_height = screen.review.len() as u16 + 2;

    let mut constraints = vec![Constraint::Length(summary_height)];
    constraints.extend((0..field_count).map(|_| Constraint::Length(FIELD_HEIGHT)));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let label_width = screen
        .review
        .iter()
        .map(|r| r.label.chars().count())
        .max()
        .unwrap_or(0);

    let rows: Vec<Line> = screen
        .review
        .iter()
        .map(|row| {
            Line::from(vec![
                Span::styled(
                    format!("{:<label_width$}  ", row.label),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(row.text.as_str()),
            ])
        })
        .collect();

    let summary = Paragraph::new(rows).block(
        Block::default()
            .title(" Your Details ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(summary, chunks[0]);

    if let Some(step) = screen.current() {
        for (idx, field) in step.fields.iter().enumerate() {
            draw_field(frame, chunks[idx + 1], field, screen.active_field_index == idx);
        }
    }
}

/// Label of the forward button for the visible step
pub fn forward_label(screen: &RegistrationScreen) -> String {
    if screen.submit_busy {
        "Processing...".to_string()
    } else if screen.is_review_visible() {
        format!("Submit Registration ({SUBMIT_SHORTCUT})")
    } else {
        format!("Next → ({NEXT_SHORTCUT})")
    }
}

fn draw_buttons(frame: &mut Frame, area: Rect, screen: &RegistrationScreen) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(22), // Back
            Constraint::Min(0),     // Gap
            Constraint::Length(34), // Next / Submit
        ])
        .split(area);

    let on_buttons = screen.is_buttons_row_active();

    if screen.visible_step > 1 {
        render_action_button(
            frame,
            chunks[0],
            &format!("← Back ({BACK_SHORTCUT})"),
            on_buttons && screen.selected_button == FormButton::Back,
            !screen.submit_busy,
            Some(Color::Gray),
        );
    }

    render_action_button(
        frame,
        chunks[2],
        &forward_label(screen),
        on_buttons && screen.selected_button == FormButton::Forward,
        !screen.submit_busy,
        Some(Color::Green),
    );
}
