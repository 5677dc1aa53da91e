use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};

use crate::alert::AlertDescriptor;

const ALERT_WIDTH_PERCENT: u16 = 60;
/// Borders plus horizontal padding.
const HORIZONTAL_CHROME: u16 = 4;
/// Borders, the blank row above the message, the gap and the button row.
const VERTICAL_CHROME: u16 = 5;

pub fn render(frame: &mut Frame, area: Rect, alert: &AlertDescriptor) {
    let horizontal = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Percentage(ALERT_WIDTH_PERCENT),
        Constraint::Fill(1),
    ])
    .split(area);
    let message_width = horizontal[1].width.saturating_sub(HORIZONTAL_CHROME);

    let message = Paragraph::new(alert.message.as_str())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .fg(Color::White);
    let message_lines =
        u16::try_from(message.line_count(message_width)).unwrap_or(u16::MAX);
    let height = message_lines.saturating_add(VERTICAL_CHROME).min(area.height);

    let vertical = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .split(horizontal[1]);
    let popup = vertical[1];

    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(Line::from(alert.title.as_str()).bold().centered())
        .borders(Borders::ALL)
        .border_style(Color::Cyan)
        .padding(Padding::horizontal(1));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(inner);

    frame.render_widget(message, chunks[1]);

    let button = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("[ {} ]", alert.button_text),
            Style::default().fg(Color::Green).bold(),
        ),
        Span::styled("  enter", Style::default().fg(Color::DarkGray)),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(button, chunks[3]);
}
