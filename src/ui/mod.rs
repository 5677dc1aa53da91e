mod alert;
mod loading;
mod quiz;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.step() {
        Some(step) => quiz::render(frame, area, step, app.phase(), app.feedback()),
        None => loading::render(frame, area),
    }

    if let Some(alert) = app.alert() {
        alert::render(frame, area, alert);
    }
}
