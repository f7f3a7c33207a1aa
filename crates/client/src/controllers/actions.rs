//! Parameterless workflow actions: save, generate, undo, download.

use std::sync::Arc;

use fieldmap_core::contract::Command;

use super::{dispatch, effects_for};
use crate::api::MappingApi;
use crate::ui::Effect;

pub struct WorkflowActions<A: ?Sized> {
    api: Arc<A>,
}

impl<A: MappingApi + ?Sized> WorkflowActions<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Persist the server's current mappings.
    pub async fn persist_mappings(&self) -> Vec<Effect> {
        self.run(Command::SaveMapping).await
    }

    /// Generate the output artifact from the current mappings.
    pub async fn generate_output(&self) -> Vec<Effect> {
        self.run(Command::GenerateOutput).await
    }

    /// Revert server-side mappings to their original state. Resyncs on
    /// success.
    pub async fn undo_last_change(&self) -> Vec<Effect> {
        self.run(Command::UndoChanges).await
    }

    /// Navigate to the generated artifact. No request is issued.
    pub fn download_output(&self) -> Vec<Effect> {
        vec![Effect::Navigate(self.api.download_url())]
    }

    async fn run(&self, command: Command) -> Vec<Effect> {
        let settlement = dispatch(self.api.as_ref(), &command).await;
        effects_for(&command, &settlement, None)
    }
}
