//! Advice screen rendering
//!
//! Renders the title bar, the advice card (or the loading / empty message),
//! the key hints and the notification line.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use dailyadvice::app::{App, View};
use dailyadvice::data::Advice;

use super::toast;

/// Width the advice card is capped at
const CARD_MAX_WIDTH: u16 = 72;

/// Renders the whole advice screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(5),    // Card
            Constraint::Length(1), // Notification
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    render_title(frame, chunks[0]);

    let card_area = centered_card(chunks[1]);
    match app.view() {
        View::Loading => render_message(frame, card_area, "Fetching advice...", Color::Cyan),
        View::Advice(advice) => render_card(frame, card_area, advice),
        View::Empty => render_message(
            frame,
            card_area,
            "No advice yet. Press r to try again.",
            Color::DarkGray,
        ),
    }

    toast::render(frame, chunks[2], app.notifier.current());
    render_hints(frame, chunks[3]);
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        "Advice of the Day",
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));

    frame.render_widget(title, area);
}

fn render_card(frame: &mut Frame, area: Rect, advice: &Advice) {
    let lines = vec![
        Line::from(Span::styled(
            advice.heading().to_uppercase(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("\u{201C}{}\u{201D}", advice.text),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];

    let card = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(card, area);
}

fn render_message(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

fn render_hints(frame: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Yellow);
    let hints = Line::from(vec![
        Span::styled("r", key),
        Span::raw(" refresh  "),
        Span::styled("c", key),
        Span::raw(" copy  "),
        Span::styled("?", key),
        Span::raw(" help  "),
        Span::styled("q", key),
        Span::raw(" quit"),
    ]);

    frame.render_widget(Paragraph::new(hints).alignment(Alignment::Center), area);
}

/// Centers a card of at most `CARD_MAX_WIDTH` columns and 7 rows in `area`
fn centered_card(area: Rect) -> Rect {
    let width = area.width.min(CARD_MAX_WIDTH);
    let height = area.height.min(7);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
