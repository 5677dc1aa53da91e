use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::app::{AnswerFeedback, RoundPhase};
use crate::models::{Poster, StepViewModel};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    step: &StepViewModel,
    phase: RoundPhase,
    feedback: Option<AnswerFeedback>,
) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_progress(frame, chunks[0], &step.question_number);
    render_poster(frame, chunks[1], &step.poster, feedback);
    render_question_text(frame, chunks[2], &step.question);
    render_controls(frame, chunks[3], phase == RoundPhase::AwaitingAnswer);
}

fn render_progress(frame: &mut Frame, area: Rect, question_number: &str) {
    let chunks = Layout::horizontal([Constraint::Fill(1), Constraint::Length(10)]).split(area);

    frame.render_widget(Paragraph::new("Question:").fg(Color::DarkGray), chunks[0]);
    frame.render_widget(
        Paragraph::new(question_number)
            .alignment(Alignment::Right)
            .fg(Color::DarkGray),
        chunks[1],
    );
}

fn render_poster(
    frame: &mut Frame,
    area: Rect,
    poster: &Poster,
    feedback: Option<AnswerFeedback>,
) {
    let (border_type, border_color) = match feedback {
        Some(AnswerFeedback::Correct) => (BorderType::Thick, Color::Green),
        Some(AnswerFeedback::Incorrect) => (BorderType::Thick, Color::Red),
        None => (BorderType::Rounded, Color::DarkGray),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_color);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let caption = match poster {
        Poster::Captioned(caption) => caption.as_str(),
        Poster::Blank => "",
    };

    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(2),
        Constraint::Fill(1),
    ])
    .split(inner);

    let widget = Paragraph::new(caption)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .fg(Color::Yellow)
        .bold();
    frame.render_widget(widget, chunks[1]);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, enabled: bool) {
    let color = if enabled { Color::Gray } else { Color::DarkGray };
    let widget = Paragraph::new("n/← no  ·  y/→ yes  ·  q quit")
        .alignment(Alignment::Center)
        .fg(color);
    frame.render_widget(widget, area);
}
