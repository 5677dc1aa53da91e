//! Single-button modal alerts.

use std::fmt;

use tracing::{debug, warn};

type AcknowledgeHandler = Box<dyn FnOnce() + Send>;

/// Content of an alert plus what to do once the user dismisses it.
pub struct AlertDescriptor {
    pub title: String,
    pub message: String,
    pub button_text: String,
    on_acknowledge: AcknowledgeHandler,
}

impl AlertDescriptor {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        button_text: impl Into<String>,
        on_acknowledge: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            button_text: button_text.into(),
            on_acknowledge: Box::new(on_acknowledge),
        }
    }
}

impl fmt::Debug for AlertDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertDescriptor")
            .field("title", &self.title)
            .field("message", &self.message)
            .field("button_text", &self.button_text)
            .finish_non_exhaustive()
    }
}

/// Holds the alert currently on screen, if any.
#[derive(Debug, Default)]
pub struct AlertPresenter {
    active: Option<AlertDescriptor>,
}

impl AlertPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show an alert. Only one alert is shown at a time; presenting while
    /// another is active replaces it without running its handler.
    pub fn present(&mut self, descriptor: AlertDescriptor) {
        if let Some(previous) = &self.active {
            warn!(title = %previous.title, "alert replaced before it was acknowledged");
        }
        debug!(title = %descriptor.title, "presenting alert");
        self.active = Some(descriptor);
    }

    /// Dismiss the active alert and run its handler.
    ///
    /// Returns `false` when no alert was showing.
    pub fn acknowledge(&mut self) -> bool {
        match self.active.take() {
            Some(descriptor) => {
                debug!(title = %descriptor.title, "alert acknowledged");
                (descriptor.on_acknowledge)();
                true
            }
            None => false,
        }
    }

    pub fn active(&self) -> Option<&AlertDescriptor> {
        self.active.as_ref()
    }

    pub fn is_presenting(&self) -> bool {
        self.active.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_alert(title: &str, count: &Arc<AtomicUsize>) -> AlertDescriptor {
        let count = Arc::clone(count);
        AlertDescriptor::new(title, "message", "OK", move || {
            count.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_handler_runs_exactly_once() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut presenter = AlertPresenter::new();
        presenter.present(counting_alert("Round over", &count));

        assert!(presenter.is_presenting());
        assert_eq!(presenter.active().unwrap().title, "Round over");

        assert!(presenter.acknowledge());
        assert!(!presenter.acknowledge());
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(presenter.active().is_none());
    }

    #[test]
    fn test_acknowledge_without_alert_is_noop() {
        let mut presenter = AlertPresenter::new();
        assert!(!presenter.acknowledge());
    }

    #[test]
    fn test_replaced_alert_handler_never_runs() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let mut presenter = AlertPresenter::new();

        presenter.present(counting_alert("first", &first));
        presenter.present(counting_alert("second", &second));
        presenter.acknowledge();

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_debug_omits_handler() {
        let alert = AlertDescriptor::new("Title", "Body", "OK", || {});
        let debug = format!("{:?}", alert);
        assert!(debug.contains("Title"));
        assert!(debug.contains(".."));
    }
}
