//! Event overview: date, countdown, and statistics

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::Instant;

/// Height of a countdown or statistic tile
const TILE_HEIGHT: u16 = 4;

/// Draw the overview page
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Overview ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),           // Event name
            Constraint::Length(1),           // Date
            Constraint::Length(1),           // Spacer
            Constraint::Length(1),           // Countdown heading
            Constraint::Length(TILE_HEIGHT), // Countdown tiles
            Constraint::Length(1),           // Spacer
            Constraint::Length(1),           // Stats heading
            Constraint::Length(TILE_HEIGHT), // Stat tiles
            Constraint::Min(0),              // Remaining space
            Constraint::Length(1),           // Call to action
        ])
        .margin(1)
        .split(inner);

    let name = Paragraph::new(Span::styled(
        app.state.event_name.as_str(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(name, chunks[0]);

    let date = Paragraph::new(Span::styled(
        event_date_label(app),
        Style::default().fg(Color::Gray),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(date, chunks[1]);

    let countdown = app.state.countdown.remaining();
    let heading = if countdown.is_zero() {
        "The event has started!"
    } else {
        "Starts in"
    };
    frame.render_widget(section_heading(heading), chunks[3]);
    let cells: Vec<(String, String)> = countdown
        .cells()
        .into_iter()
        .map(|(value, label)| (value, label.to_string()))
        .collect();
    draw_tiles(frame, chunks[4], &cells, Color::Yellow);

    frame.render_widget(section_heading("At a glance"), chunks[6]);
    let now = Instant::now();
    let stats: Vec<(String, String)> = app
        .state
        .counters
        .counters
        .iter()
        .map(|c| (format!("{}+", c.value_at(now)), c.label.clone()))
        .collect();
    draw_tiles(frame, chunks[7], &stats, Color::Green);

    let cta = Paragraph::new(Line::from(vec![
        Span::raw("Press "),
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" to register"),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(cta, chunks[9]);
}

fn event_date_label(app: &App) -> String {
    app.state
        .countdown
        .target
        .with_timezone(&chrono::Local)
        .format("%A, %d %B %Y · %H:%M")
        .to_string()
}

fn section_heading(text: &str) -> Paragraph<'_> {
    Paragraph::new(Span::styled(
        text,
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
}

/// Row of equal-width tiles, each a big value over a small label
fn draw_tiles(frame: &mut Frame, area: Rect, tiles: &[(String, String)], color: Color) {
    if tiles.is_empty() {
        return;
    }
    let constraints: Vec<Constraint> = tiles
        .iter()
        .map(|_| Constraint::Ratio(1, tiles.len() as u32))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for ((value, label), tile_area) in tiles.iter().zip(chunks.iter()) {
        let content = vec![
            Line::from(Span::styled(
                value.as_str(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                label.as_str(),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let tile = Paragraph::new(content).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(tile, *tile_area);
    }
}
