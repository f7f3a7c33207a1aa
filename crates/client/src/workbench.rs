//! The mapping workbench: controllers wired to a presentation surface.
//!
//! [`Workbench`] is what a front end holds. Each method mirrors one user
//! interaction, runs the matching controller and applies the resulting
//! [`Effect`]s: dialogs and navigation go straight to the
//! [`Presentation`], notices go through the [`Notifier`], and
//! [`Effect::Resync`] refetches the authoritative [`MappingDocument`] and
//! replaces the held copy.

use std::sync::Arc;

use fieldmap_core::mapping::{FieldMapping, MappingDocument};
use tokio::sync::RwLock;

use crate::api::MappingApi;
use crate::controllers::{MappingFormController, MismatchController, WorkflowActions};
use crate::error::ApiError;
use crate::notifier::Notifier;
use crate::ui::{Effect, Notice, Presentation, UiUpdate};

pub struct Workbench<A: ?Sized, P> {
    api: Arc<A>,
    presentation: Arc<P>,
    notifier: Notifier<P>,
    forms: MappingFormController<A>,
    mismatches: MismatchController<A>,
    actions: WorkflowActions<A>,
    /// Last document fetched from the server. Replaced, never edited.
    document: RwLock<Option<Arc<MappingDocument>>>,
}

impl<A: MappingApi + ?Sized, P: Presentation> Workbench<A, P> {
    pub fn new(api: Arc<A>, presentation: Arc<P>, notifier: Notifier<P>) -> Self {
        Self {
            forms: MappingFormController::new(Arc::clone(&api)),
            mismatches: MismatchController::new(Arc::clone(&api)),
            actions: WorkflowActions::new(Arc::clone(&api)),
            api,
            presentation,
            notifier,
            document: RwLock::new(None),
        }
    }

    pub fn forms(&self) -> &MappingFormController<A> {
        &self.forms
    }

    pub fn mismatches(&self) -> &MismatchController<A> {
        &self.mismatches
    }

    /// The most recently fetched document, if any.
    pub async fn document(&self) -> Option<Arc<MappingDocument>> {
        self.document.read().await.clone()
    }

    /// Fetch the authoritative document and display it.
    ///
    /// The write lock is held across the fetch so concurrent loads apply
    /// in the order they started.
    pub async fn load(&self) -> Result<Arc<MappingDocument>, ApiError> {
        let mut held = self.document.write().await;
        let document = Arc::new(self.api.fetch_document().await?);
        tracing::info!(
            mappings = document.mappings.len(),
            mismatches = document.mismatches.len(),
            "Loaded mapping document"
        );
        *held = Some(Arc::clone(&document));
        self.presentation
            .apply(UiUpdate::ReplaceState(Arc::clone(&document)));
        drop(held);
        Ok(document)
    }

    // ---- mapping dialogs ----

    pub async fn open_edit(&self, mapping: FieldMapping) {
        let effects = self.forms.open_edit(mapping).await;
        self.apply(effects).await;
    }

    pub async fn open_add(&self) {
        let effects = self.forms.open_add().await;
        self.apply(effects).await;
    }

    pub async fn submit_edit(&self, mapping: FieldMapping) {
        let effects = self.forms.submit_edit(mapping).await;
        self.apply(effects).await;
    }

    pub async fn submit_add(&self, mapping: FieldMapping) {
        let effects = self.forms.submit_add(mapping).await;
        self.apply(effects).await;
    }

    // ---- mismatch dialog ----

    pub async fn open_resolve(&self, j1_field: impl Into<String>, j1_type: impl Into<String>) {
        let effects = self.mismatches.open_resolve(j1_field, j1_type).await;
        self.apply(effects).await;
    }

    pub async fn submit_resolve(
        &self,
        resolved_j2_field: impl Into<String>,
        resolved_type: impl Into<String>,
    ) {
        let effects = self
            .mismatches
            .submit_resolve(resolved_j2_field, resolved_type)
            .await;
        self.apply(effects).await;
    }

    // ---- workflow actions ----

    pub async fn persist_mappings(&self) {
        let effects = self.actions.persist_mappings().await;
        self.apply(effects).await;
    }

    pub async fn generate_output(&self) {
        let effects = self.actions.generate_output().await;
        self.apply(effects).await;
    }

    pub async fn undo_last_change(&self) {
        let effects = self.actions.undo_last_change().await;
        self.apply(effects).await;
    }

    pub async fn download_output(&self) {
        let effects = self.actions.download_output();
        self.apply(effects).await;
    }

    async fn apply(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ShowDialog(view) => {
                    tracing::debug!(dialog = ?view.id(), "Opening dialog");
                    self.presentation.apply(UiUpdate::ShowDialog(view));
                }
                Effect::HideDialog(id) => self.presentation.apply(UiUpdate::HideDialog(id)),
                Effect::Navigate(url) => {
                    tracing::info!(%url, "Navigating");
                    self.presentation.apply(UiUpdate::Navigate(url));
                }
                Effect::Notify(notice) => {
                    self.notifier.show(notice);
                }
                Effect::Resync => {
                    if let Err(e) = self.load().await {
                        tracing::error!(error = %e, "Failed to resync mapping document");
                        self.notifier.show(Notice::error(format!("Error: {e}")));
                    }
                }
            }
        }
    }
}
