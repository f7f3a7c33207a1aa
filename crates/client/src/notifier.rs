//! Transient status notices.
//!
//! [`Notifier::present`] shows a notice at once and schedules a one-shot
//! hide. Hides are never cancelled; rapid notices each schedule their own.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::config::DEFAULT_NOTICE_MS;
use crate::ui::{Notice, Presentation, UiUpdate};

pub struct Notifier<P> {
    presentation: Arc<P>,
    display_for: Duration,
}

impl<P: Presentation> Notifier<P> {
    pub fn new(presentation: Arc<P>, display_for: Duration) -> Self {
        Self {
            presentation,
            display_for,
        }
    }

    pub fn display_for(&self) -> Duration {
        self.display_for
    }

    /// Show `message` in the success or error style, then hide it after the
    /// configured delay.
    pub fn present(&self, message: impl Into<String>, is_error: bool) -> JoinHandle<()> {
        self.show(Notice::new(message, is_error))
    }

    /// Show a prepared notice. Must be called within a Tokio runtime.
    pub fn show(&self, notice: Notice) -> JoinHandle<()> {
        if notice.is_error() {
            tracing::debug!(message = %notice.message, "Showing error notice");
        }
        self.presentation.apply(UiUpdate::ShowStatus(notice));

        let presentation = Arc::clone(&self.presentation);
        let delay = self.display_for;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            presentation.apply(UiUpdate::HideStatus);
        })
    }
}

impl<P: Presentation> Clone for Notifier<P> {
    fn clone(&self) -> Self {
        Self {
            presentation: Arc::clone(&self.presentation),
            display_for: self.display_for,
        }
    }
}

/// Notifier using the default 3000 ms display time.
impl<P: Presentation> From<Arc<P>> for Notifier<P> {
    fn from(presentation: Arc<P>) -> Self {
        Self::new(presentation, Duration::from_millis(DEFAULT_NOTICE_MS))
    }
}
