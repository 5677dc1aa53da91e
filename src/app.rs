//! Round lifecycle.
//!
//! [`App`] glues the progression tracker, the statistics service and the
//! alert presenter together. It is driven by two inputs: user actions
//! ([`App::answer`], [`App::acknowledge_alert`]) and [`AppEvent`]s drained
//! from the event channel. Both are handled on the same loop, so state is
//! never mutated concurrently.

use std::time::Duration;

use chrono::Local;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::alert::{AlertDescriptor, AlertPresenter};
use crate::data::{LoadError, QuestionFactory};
use crate::event::{AppEvent, EventSender};
use crate::models::{Question, StepViewModel};
use crate::progress::QuizProgress;
use crate::statistics::{KeyValueStore, StatisticService, StatisticsObserver};

/// Default pause between an answer and the next question.
pub const DEFAULT_FEEDBACK_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Waiting for question data or the next question.
    Loading,
    AwaitingAnswer,
    /// Answer shown as right or wrong; input locked until the delay ends.
    Evaluating,
    /// Result stored, summary alert pending or shown.
    RoundComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerFeedback {
    Correct,
    Incorrect,
}

impl AnswerFeedback {
    fn from_correct(is_correct: bool) -> Self {
        if is_correct {
            AnswerFeedback::Correct
        } else {
            AnswerFeedback::Incorrect
        }
    }
}

impl StatisticsObserver for EventSender {
    fn did_receive_stored_data(&self) {
        self.send(AppEvent::StatisticsStored);
    }
}

pub struct App {
    phase: RoundPhase,
    progress: QuizProgress,
    factory: Box<dyn QuestionFactory>,
    statistics: StatisticService<Box<dyn KeyValueStore>>,
    alerts: AlertPresenter,
    events: EventSender,
    feedback_delay: Duration,
    current_question: Option<Question>,
    step: Option<StepViewModel>,
    feedback: Option<AnswerFeedback>,
    haptic: Option<AnswerFeedback>,
    pending_feedback: Option<JoinHandle<()>>,
    round_id: Uuid,
}

impl App {
    pub fn new(
        factory: Box<dyn QuestionFactory>,
        storage: Box<dyn KeyValueStore>,
        questions_amount: usize,
        feedback_delay: Duration,
        events: EventSender,
    ) -> Self {
        let mut statistics = StatisticService::new(storage);
        statistics.set_observer(Some(Box::new(events.clone())));

        Self {
            phase: RoundPhase::Loading,
            progress: QuizProgress::new(questions_amount),
            factory,
            statistics,
            alerts: AlertPresenter::new(),
            events,
            feedback_delay,
            current_question: None,
            step: None,
            feedback: None,
            haptic: None,
            pending_feedback: None,
            round_id: Uuid::new_v4(),
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn progress(&self) -> &QuizProgress {
        &self.progress
    }

    pub fn statistics(&self) -> &StatisticService<Box<dyn KeyValueStore>> {
        &self.statistics
    }

    pub fn step(&self) -> Option<&StepViewModel> {
        self.step.as_ref()
    }

    pub fn feedback(&self) -> Option<AnswerFeedback> {
        self.feedback
    }

    pub fn alert(&self) -> Option<&AlertDescriptor> {
        self.alerts.active()
    }

    pub fn round_id(&self) -> Uuid {
        self.round_id
    }

    /// Take the feedback signal raised by the last answer, if not yet taken.
    pub fn take_haptic(&mut self) -> Option<AnswerFeedback> {
        self.haptic.take()
    }

    /// Cold start: reset the round and load question data.
    pub fn start(&mut self) {
        self.progress.reset_round();
        info!(round_id = %self.round_id, "starting quiz");
        self.load_data();
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        debug!(?event, phase = ?self.phase, "handling event");

        match event {
            AppEvent::DataLoaded(count) => {
                info!(count, "question data loaded");
                self.request_next_question();
            }
            AppEvent::DataLoadFailed(reason) => self.show_load_error(reason),
            AppEvent::QuestionReceived(Some(question)) => self.did_receive_next_question(question),
            AppEvent::QuestionReceived(None) => {
                self.show_load_error(LoadError::Exhausted.to_string());
            }
            AppEvent::FeedbackElapsed => self.show_next_question_or_results(),
            AppEvent::StatisticsStored => self.show_results(),
            AppEvent::RestartRequested => self.restart(),
            AppEvent::RetryLoadRequested => self.load_data(),
        }
    }

    /// Submit the user's yes/no answer for the displayed question.
    pub fn answer(&mut self, given: bool) {
        if self.alerts.is_presenting() || self.phase != RoundPhase::AwaitingAnswer {
            debug!(phase = ?self.phase, "answer ignored while input is locked");
            return;
        }

        let Some(question) = &self.current_question else {
            debug!("answer ignored, no current question");
            return;
        };

        let is_correct = self
            .progress
            .record_answer(given, question.correct_answer);
        let feedback = AnswerFeedback::from_correct(is_correct);
        debug!(
            round_id = %self.round_id,
            index = self.progress.current_question_index(),
            given,
            is_correct,
            "answer recorded"
        );

        self.feedback = Some(feedback);
        self.haptic = Some(feedback);
        self.phase = RoundPhase::Evaluating;
        self.pending_feedback = Some(
            self.events
                .send_after(self.feedback_delay, AppEvent::FeedbackElapsed),
        );
    }

    /// Dismiss the active alert. Returns `false` when none was shown.
    pub fn acknowledge_alert(&mut self) -> bool {
        self.alerts.acknowledge()
    }

    /// Cancel any pending continuation; used on shutdown.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.pending_feedback.take() {
            handle.abort();
        }
    }

    fn load_data(&mut self) {
        self.phase = RoundPhase::Loading;
        match self.factory.load_data() {
            Ok(count) => self.events.send(AppEvent::DataLoaded(count)),
            Err(e) => {
                warn!(error = %e, "failed to load question data");
                self.events.send(AppEvent::DataLoadFailed(e.to_string()));
            }
        }
    }

    fn request_next_question(&mut self) {
        self.phase = RoundPhase::Loading;
        let question = self.factory.request_next_question();
        self.events.send(AppEvent::QuestionReceived(question));
    }

    fn did_receive_next_question(&mut self, question: Question) {
        self.step = Some(self.progress.to_view_model(&question));
        self.current_question = Some(question);
        self.phase = RoundPhase::AwaitingAnswer;
    }

    fn show_next_question_or_results(&mut self) {
        if self.phase != RoundPhase::Evaluating {
            debug!(phase = ?self.phase, "stale feedback timer ignored");
            return;
        }

        self.pending_feedback = None;
        self.feedback = None;

        if self.progress.is_last_question() {
            self.phase = RoundPhase::RoundComplete;
            let correct = self.progress.correct_answers();
            let total = self.progress.questions_amount();
            info!(round_id = %self.round_id, correct, total, "round complete");
            self.statistics.store(correct, total);
        } else {
            self.progress.advance();
            self.request_next_question();
        }
    }

    fn show_results(&mut self) {
        if self.phase != RoundPhase::RoundComplete {
            debug!(phase = ?self.phase, "statistics update outside round end ignored");
            return;
        }

        let message = self.results_message();
        let events = self.events.clone();
        self.alerts.present(AlertDescriptor::new(
            "This round is over!",
            message,
            "Play again",
            move || events.send(AppEvent::RestartRequested),
        ));
    }

    fn results_message(&self) -> String {
        let statistics = self.statistics.statistics();
        let best = statistics.best_game;

        format!(
            "Your result: {}/{}\nQuizzes played: {}\nRecord: {}/{} ({})\nAverage accuracy: {:.2}%",
            self.progress.correct_answers(),
            self.progress.questions_amount(),
            statistics.games_count,
            best.correct,
            best.total,
            best.date.with_timezone(&Local).format("%d.%m.%y %H:%M"),
            statistics.total_accuracy,
        )
    }

    fn show_load_error(&mut self, reason: String) {
        self.phase = RoundPhase::Loading;
        let events = self.events.clone();
        self.alerts.present(AlertDescriptor::new(
            "Something went wrong",
            format!("Could not load questions: {}", reason),
            "Try again",
            move || events.send(AppEvent::RetryLoadRequested),
        ));
    }

    fn restart(&mut self) {
        self.progress.reset_round();
        self.current_question = None;
        self.step = None;
        self.feedback = None;
        self.round_id = Uuid::new_v4();
        info!(round_id = %self.round_id, "new round");
        self.request_next_question();
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown();
    }
}
