//! Per-dialog state machine.
//!
//! ```text
//! Closed -> Open(form) -> Submitting(form) -> Closed        (accepted)
//!                                          -> Open(form)    (refused / failed)
//! ```
//!
//! While a dialog is `Submitting`, further submits and re-opens are
//! rejected so at most one request per dialog is in flight.

use tokio::sync::Mutex;

use crate::ui::DialogId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogState<F> {
    Closed,
    Open(F),
    Submitting(F),
}

impl<F> DialogState<F> {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub fn form(&self) -> Option<&F> {
        match self {
            Self::Closed => None,
            Self::Open(form) | Self::Submitting(form) => Some(form),
        }
    }
}

/// Why a dialog interaction was not carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Blocked {
    #[error("dialog is not open")]
    Closed,
    #[error("a submission is already in flight")]
    InFlight,
}

pub struct DialogSlot<F> {
    id: DialogId,
    state: Mutex<DialogState<F>>,
}

impl<F: Clone> DialogSlot<F> {
    pub fn new(id: DialogId) -> Self {
        Self {
            id,
            state: Mutex::new(DialogState::Closed),
        }
    }

    pub fn id(&self) -> DialogId {
        self.id
    }

    pub async fn snapshot(&self) -> DialogState<F> {
        self.state.lock().await.clone()
    }

    /// Open (or re-fill) the dialog with `form`.
    pub async fn open(&self, form: F) -> Result<(), Blocked> {
        let mut state = self.state.lock().await;
        if matches!(*state, DialogState::Submitting(_)) {
            return Err(Blocked::InFlight);
        }
        *state = DialogState::Open(form);
        Ok(())
    }

    /// Move an open dialog to `Submitting`.
    ///
    /// `fill` receives the form as opened and returns the values being
    /// submitted; those become the dialog contents from here on.
    pub async fn begin_submit(&self, fill: impl FnOnce(&F) -> F) -> Result<F, Blocked> {
        let mut state = self.state.lock().await;
        let submitted = match &*state {
            DialogState::Closed => return Err(Blocked::Closed),
            DialogState::Submitting(_) => return Err(Blocked::InFlight),
            DialogState::Open(opened) => fill(opened),
        };
        *state = DialogState::Submitting(submitted.clone());
        Ok(submitted)
    }

    /// Finish an in-flight submission: close on acceptance, otherwise
    /// return to `Open` with the submitted values.
    pub async fn settle(&self, accepted: bool) {
        let mut state = self.state.lock().await;
        let current = std::mem::replace(&mut *state, DialogState::Closed);
        *state = match current {
            DialogState::Submitting(_) if accepted => DialogState::Closed,
            DialogState::Submitting(form) => DialogState::Open(form),
            other => other,
        };
    }
}
