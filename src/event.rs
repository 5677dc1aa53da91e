//! Internal events and the channel that serializes them.
//!
//! Everything that changes game state after the fact (loaded data, a new
//! question, the end of the feedback delay, an acknowledged alert) arrives as
//! an [`AppEvent`] on one channel drained by the event loop.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::models::Question;

#[derive(Debug)]
pub enum AppEvent {
    DataLoaded(usize),
    DataLoadFailed(String),
    QuestionReceived(Option<Question>),
    FeedbackElapsed,
    StatisticsStored,
    RestartRequested,
    RetryLoadRequested,
}

pub type EventReceiver = mpsc::UnboundedReceiver<AppEvent>;

#[derive(Debug, Clone)]
pub struct EventSender {
    inner: mpsc::UnboundedSender<AppEvent>,
}

pub fn channel() -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender { inner: tx }, rx)
}

impl EventSender {
    pub fn send(&self, event: AppEvent) {
        if let Err(e) = self.inner.send(event) {
            debug!(event = ?e.0, "event loop closed, dropping event");
        }
    }

    /// Post `event` after `delay`. Must be called from within a tokio runtime.
    pub fn send_after(&self, delay: Duration, event: AppEvent) -> JoinHandle<()> {
        let sender = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            sender.send(event);
        })
    }
}
