//! # movie-quiz
//!
//! A terminal movie trivia game: ten yes/no questions per round, a running
//! score, and best-game statistics kept across sessions.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use movie_quiz::{Config, Quiz, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let quiz = Quiz::from_config(&Config::default())?;
//!     quiz.run().await
//! }
//! ```

mod alert;
mod app;
mod config;
mod data;
mod event;
pub mod logging;
mod models;
mod progress;
mod statistics;
pub mod terminal;
mod ui;

use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use futures_util::StreamExt;
use thiserror::Error;
use tracing::info;

pub use alert::{AlertDescriptor, AlertPresenter};
pub use app::{AnswerFeedback, App, RoundPhase, DEFAULT_FEEDBACK_DELAY};
pub use config::{Config, QuestionSource};
pub use data::{
    load_movies_from_json, load_questions_from_json, CatalogueSource, LoadError,
    MovieQuestionFactory, QuestionFactory, StaticQuestionFactory,
};
pub use event::{AppEvent, EventReceiver, EventSender};
pub use models::{Artwork, GameResult, Movie, Poster, Question, StepViewModel};
pub use progress::{QuizProgress, DEFAULT_QUESTIONS_AMOUNT};
pub use statistics::{
    CumulativeStatistics, JsonFileStore, KeyValueStore, MemoryStore, StatisticService,
    StatisticsObserver, StorageError, StoredValue,
};

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("Failed to load questions: {0}")]
    Load(#[from] LoadError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to set up logging: {0}")]
    Logging(String),
}

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    app: App,
    events: EventReceiver,
}

impl Quiz {
    /// Build a quiz from its collaborators.
    pub fn new(
        factory: Box<dyn QuestionFactory>,
        storage: Box<dyn KeyValueStore>,
        questions_amount: usize,
        feedback_delay: Duration,
    ) -> Self {
        let (sender, events) = event::channel();
        Self {
            app: App::new(factory, storage, questions_amount, feedback_delay, sender),
            events,
        }
    }

    /// Build a quiz from configuration, with statistics kept in a JSON file.
    ///
    /// A fixed question list is read eagerly and fails here; a movie
    /// catalogue is loaded once the quiz runs, where a failure is shown to the
    /// user with a retry prompt.
    pub fn from_config(config: &Config) -> Result<Self, QuizError> {
        let factory: Box<dyn QuestionFactory> = match &config.source {
            QuestionSource::BundledMovies => {
                Box::new(MovieQuestionFactory::new(CatalogueSource::Bundled))
            }
            QuestionSource::Movies(path) => Box::new(MovieQuestionFactory::new(
                CatalogueSource::File(path.clone()),
            )),
            QuestionSource::Questions(path) => {
                Box::new(StaticQuestionFactory::new(load_questions_from_json(path)?))
            }
        };

        info!(stats = %config.stats_path.display(), source = ?config.source, "quiz configured");

        Ok(Self::new(
            factory,
            Box::new(JsonFileStore::new(&config.stats_path)),
            config.questions_amount,
            config.feedback_delay,
        ))
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// when the user quits.
    pub async fn run(mut self) -> Result<(), QuizError> {
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app, &mut self.events).await;
        self.app.shutdown();
        terminal::restore()?;
        result
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

async fn run_event_loop(
    terminal: &mut terminal::AppTerminal,
    app: &mut App,
    events: &mut EventReceiver,
) -> Result<(), QuizError> {
    let mut input = EventStream::new();
    app.start();

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        tokio::select! {
            maybe_event = input.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if handle_input(app, key.code) {
                        break;
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            Some(event) = events.recv() => app.handle_event(event),
        }

        if app.take_haptic() == Some(AnswerFeedback::Incorrect) {
            terminal::bell()?;
        }
    }

    info!("quiz closed");
    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) {
        return true;
    }

    if app.alert().is_some() {
        if matches!(key, KeyCode::Enter | KeyCode::Char(' ')) {
            app.acknowledge_alert();
        }
        return false;
    }

    match key {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Right => app.answer(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Left => app.answer(false),
        _ => {}
    }
    false
}
