//! Resolve-mismatch dialog.
//!
//! Same dialog lifecycle as the mapping forms, but the source side
//! (`j1_field`, `j1_type`) is fixed when the dialog opens and cannot be
//! renamed from here.

use std::sync::Arc;

use fieldmap_core::contract::Command;
use fieldmap_core::mapping::MismatchResolution;

use super::{blocked, dispatch, effects_for};
use crate::api::MappingApi;
use crate::dialog::{DialogSlot, DialogState};
use crate::ui::{DialogId, DialogView, Effect};

pub struct MismatchController<A: ?Sized> {
    api: Arc<A>,
    resolve: DialogSlot<MismatchResolution>,
}

impl<A: MappingApi + ?Sized> MismatchController<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            resolve: DialogSlot::new(DialogId::ResolveMismatch),
        }
    }

    pub async fn state(&self) -> DialogState<MismatchResolution> {
        self.resolve.snapshot().await
    }

    pub async fn open_resolve(
        &self,
        j1_field: impl Into<String>,
        j1_type: impl Into<String>,
    ) -> Vec<Effect> {
        let form = MismatchResolution::for_mismatch(j1_field, j1_type);
        match self.resolve.open(form.clone()).await {
            Ok(()) => vec![Effect::ShowDialog(DialogView::ResolveMismatch(form))],
            Err(reason) => blocked(self.resolve.id(), reason),
        }
    }

    /// Submit the chosen J2 field and type for the mismatch the dialog was
    /// opened with.
    pub async fn submit_resolve(
        &self,
        resolved_j2_field: impl Into<String>,
        resolved_type: impl Into<String>,
    ) -> Vec<Effect> {
        let resolved_j2_field = resolved_j2_field.into();
        let resolved_type = resolved_type.into();
        let form = match self
            .resolve
            .begin_submit(|opened| MismatchResolution {
                resolved_j2_field,
                resolved_type,
                ..opened.clone()
            })
            .await
        {
            Ok(form) => form,
            Err(reason) => return blocked(self.resolve.id(), reason),
        };

        let command = Command::resolve(&form);
        let settlement = dispatch(self.api.as_ref(), &command).await;
        self.resolve.settle(settlement.is_accepted()).await;
        effects_for(&command, &settlement, Some(self.resolve.id()))
    }
}
