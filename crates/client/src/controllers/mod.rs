//! Controllers for the mapping workflow.
//!
//! Each controller turns one user interaction into at most one server
//! request and answers with the [`Effect`]s the UI should apply. They
//! share [`dispatch`] and [`effects_for`] so every action settles the
//! same way:
//!
//! - accepted: success notice, close the dialog, resync if state may
//!   have changed
//! - refused: `Failed to <action>` notice, dialog stays open
//! - transport or parse failure: `Error: <detail>` notice, dialog stays open

pub mod actions;
pub mod mapping_form;
pub mod mismatch;

pub use actions::WorkflowActions;
pub use mapping_form::MappingFormController;
pub use mismatch::MismatchController;

use fieldmap_core::contract::Command;
use fieldmap_core::error::CoreError;

use crate::api::MappingApi;
use crate::dialog::Blocked;
use crate::ui::{DialogId, Effect, Notice};

/// How a request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// `{"success": true}`.
    Accepted,
    /// The server answered but refused, optionally saying why.
    Refused(Option<String>),
    /// The request never produced a usable answer.
    Failed(String),
}

impl Settlement {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Issue `command` and classify the outcome. Never fails: every error is
/// folded into [`Settlement::Failed`].
pub async fn dispatch<A: MappingApi + ?Sized>(api: &A, command: &Command) -> Settlement {
    let endpoint = command.endpoint().path();
    match api.send(command).await {
        Ok(result) if result.success => {
            tracing::info!(endpoint, "Mapping server accepted request");
            Settlement::Accepted
        }
        Ok(result) => {
            tracing::warn!(endpoint, error = ?result.error, "Mapping server refused request");
            Settlement::Refused(result.error)
        }
        Err(e) => {
            tracing::error!(endpoint, error = %e, "Mapping server request failed");
            Settlement::Failed(e.to_string())
        }
    }
}

/// Effects for a settled `command`. `dialog` is closed on acceptance.
pub fn effects_for(
    command: &Command,
    settlement: &Settlement,
    dialog: Option<DialogId>,
) -> Vec<Effect> {
    match settlement {
        Settlement::Accepted => {
            let mut effects = vec![Effect::Notify(Notice::success(command.success_message()))];
            if let Some(id) = dialog {
                effects.push(Effect::HideDialog(id));
            }
            if command.resyncs_on_success() {
                effects.push(Effect::Resync);
            }
            effects
        }
        Settlement::Refused(None) => vec![Effect::Notify(Notice::error(command.failure_message()))],
        Settlement::Refused(Some(detail)) => vec![Effect::Notify(Notice::error(format!(
            "{}: {detail}",
            command.failure_message()
        )))],
        Settlement::Failed(detail) => {
            vec![Effect::Notify(Notice::error(format!("Error: {detail}")))]
        }
    }
}

/// Effects for a submit that failed form validation.
fn invalid(err: &CoreError) -> Vec<Effect> {
    vec![Effect::Notify(Notice::error(err.to_string()))]
}

/// Effects for an interaction the dialog state did not allow.
fn blocked(dialog: DialogId, reason: Blocked) -> Vec<Effect> {
    tracing::debug!(?dialog, %reason, "Ignoring dialog interaction");
    Vec::new()
}
