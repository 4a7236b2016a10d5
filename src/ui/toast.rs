//! Single-line notification rendering

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use dailyadvice::notify::{Notification, Severity};

/// Renders `notification` into `area`; renders nothing when there is none
pub fn render(frame: &mut Frame, area: Rect, notification: Option<&Notification>) {
    let Some(notification) = notification else {
        return;
    };

    let (icon, color) = match notification.severity {
        Severity::Success => ("\u{2714}", Color::Green), // ✔
        Severity::Error => ("\u{2716}", Color::Red),     // ✖
    };

    let line = Line::from(vec![Span::styled(
        format!("{} {}", icon, notification.message),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )]);

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
