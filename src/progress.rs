//! Question progression for a single round.

use tracing::warn;

use crate::models::{Poster, Question, StepViewModel};

/// Default number of questions per round.
pub const DEFAULT_QUESTIONS_AMOUNT: usize = 10;

/// Tracks the current question index and running score of a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizProgress {
    questions_amount: usize,
    current_question_index: usize,
    correct_answers: usize,
}

impl QuizProgress {
    /// A round always has at least one question; zero is clamped to one.
    pub fn new(questions_amount: usize) -> Self {
        Self {
            questions_amount: questions_amount.max(1),
            current_question_index: 0,
            correct_answers: 0,
        }
    }

    pub fn questions_amount(&self) -> usize {
        self.questions_amount
    }

    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    pub fn correct_answers(&self) -> usize {
        self.correct_answers
    }

    pub fn is_last_question(&self) -> bool {
        self.current_question_index == self.questions_amount - 1
    }

    /// Move to the next question. Callers check [`is_last_question`] first;
    /// advancing past the last question leaves the index unchanged.
    ///
    /// [`is_last_question`]: QuizProgress::is_last_question
    pub fn advance(&mut self) {
        if self.is_last_question() {
            warn!(
                index = self.current_question_index,
                "advance called on the last question"
            );
            return;
        }
        self.current_question_index += 1;
    }

    pub fn reset_round(&mut self) {
        self.current_question_index = 0;
        self.correct_answers = 0;
    }

    /// Returns whether the answer was correct, counting it if so.
    pub fn record_answer(&mut self, given: bool, expected: bool) -> bool {
        let is_correct = given == expected;
        if is_correct && self.correct_answers < self.questions_amount {
            self.correct_answers += 1;
        }
        is_correct
    }

    pub fn to_view_model(&self, question: &Question) -> StepViewModel {
        StepViewModel {
            poster: Poster::resolve(&question.artwork),
            question: question.text.clone(),
            question_number: format!(
                "{}/{}",
                self.current_question_index + 1,
                self.questions_amount
            ),
        }
    }
}

impl Default for QuizProgress {
    fn default() -> Self {
        Self::new(DEFAULT_QUESTIONS_AMOUNT)
    }
}
