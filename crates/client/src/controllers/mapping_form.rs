//! Add-mapping and edit-mapping dialogs.

use std::sync::Arc;

use fieldmap_core::contract::Command;
use fieldmap_core::mapping::FieldMapping;

use super::{blocked, dispatch, effects_for, invalid};
use crate::api::MappingApi;
use crate::dialog::{DialogSlot, DialogState};
use crate::ui::{DialogId, DialogView, EditMappingForm, Effect};

/// Owns the add and edit dialogs and submits their requests.
pub struct MappingFormController<A: ?Sized> {
    api: Arc<A>,
    add: DialogSlot<FieldMapping>,
    edit: DialogSlot<EditMappingForm>,
}

impl<A: MappingApi + ?Sized> MappingFormController<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            add: DialogSlot::new(DialogId::AddMapping),
            edit: DialogSlot::new(DialogId::EditMapping),
        }
    }

    pub async fn add_state(&self) -> DialogState<FieldMapping> {
        self.add.snapshot().await
    }

    pub async fn edit_state(&self) -> DialogState<EditMappingForm> {
        self.edit.snapshot().await
    }

    /// Open the edit dialog prefilled from `mapping`. The mapping's J1 field
    /// is kept as the identity the server will look up.
    pub async fn open_edit(&self, mapping: FieldMapping) -> Vec<Effect> {
        let form = EditMappingForm::prefilled(mapping);
        match self.edit.open(form.clone()).await {
            Ok(()) => vec![Effect::ShowDialog(DialogView::EditMapping(form))],
            Err(reason) => blocked(self.edit.id(), reason),
        }
    }

    /// Open the add dialog with empty fields.
    pub async fn open_add(&self) -> Vec<Effect> {
        let form = FieldMapping::default();
        match self.add.open(form.clone()).await {
            Ok(()) => vec![Effect::ShowDialog(DialogView::AddMapping(form))],
            Err(reason) => blocked(self.add.id(), reason),
        }
    }

    /// Submit the edit dialog with the values currently in its fields.
    pub async fn submit_edit(&self, mapping: FieldMapping) -> Vec<Effect> {
        let form = match self
            .edit
            .begin_submit(|opened| EditMappingForm {
                old_j1_field: opened.old_j1_field.clone(),
                mapping,
            })
            .await
        {
            Ok(form) => form,
            Err(reason) => return blocked(self.edit.id(), reason),
        };

        if let Err(err) = form.mapping.validate() {
            self.edit.settle(false).await;
            return invalid(&err);
        }

        let command = Command::edit(form.old_j1_field, form.mapping);
        let settlement = dispatch(self.api.as_ref(), &command).await;
        self.edit.settle(settlement.is_accepted()).await;
        effects_for(&command, &settlement, Some(self.edit.id()))
    }

    /// Submit the add dialog with the values currently in its fields.
    pub async fn submit_add(&self, mapping: FieldMapping) -> Vec<Effect> {
        let form = match self.add.begin_submit(|_| mapping).await {
            Ok(form) => form,
            Err(reason) => return blocked(self.add.id(), reason),
        };

        if let Err(err) = form.validate() {
            self.add.settle(false).await;
            return invalid(&err);
        }

        let command = Command::AddMapping(form);
        let settlement = dispatch(self.api.as_ref(), &command).await;
        self.add.settle(settlement.is_accepted()).await;
        effects_for(&command, &settlement, Some(self.add.id()))
    }
}
