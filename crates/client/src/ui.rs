//! View-models and the vocabulary controllers use to describe UI changes.
//!
//! Controllers never touch a rendering surface. They return [`Effect`]s;
//! the [`Workbench`](crate::workbench::Workbench) turns those into
//! [`UiUpdate`]s for a [`Presentation`].

use std::sync::Arc;

use fieldmap_core::mapping::{FieldMapping, MappingDocument, MismatchResolution};

/// Visual style of a status notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeStyle {
    Success,
    Error,
}

/// A transient status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub style: NoticeStyle,
}

impl Notice {
    pub fn new(message: impl Into<String>, is_error: bool) -> Self {
        Self {
            message: message.into(),
            style: if is_error {
                NoticeStyle::Error
            } else {
                NoticeStyle::Success
            },
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, false)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, true)
    }

    pub fn is_error(&self) -> bool {
        self.style == NoticeStyle::Error
    }
}

/// The three dialogs of the mapping workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogId {
    AddMapping,
    EditMapping,
    ResolveMismatch,
}

/// Contents of the edit dialog, including the hidden identity field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditMappingForm {
    /// J1 field of the mapping when the dialog was opened.
    pub old_j1_field: String,
    pub mapping: FieldMapping,
}

impl EditMappingForm {
    pub fn prefilled(mapping: FieldMapping) -> Self {
        Self {
            old_j1_field: mapping.j1_field.clone(),
            mapping,
        }
    }
}

/// A dialog together with the values it displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogView {
    AddMapping(FieldMapping),
    EditMapping(EditMappingForm),
    ResolveMismatch(MismatchResolution),
}

impl DialogView {
    pub fn id(&self) -> DialogId {
        match self {
            Self::AddMapping(_) => DialogId::AddMapping,
            Self::EditMapping(_) => DialogId::EditMapping,
            Self::ResolveMismatch(_) => DialogId::ResolveMismatch,
        }
    }
}

/// What a controller asks the UI to do after handling an interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ShowDialog(DialogView),
    HideDialog(DialogId),
    Notify(Notice),
    /// Refetch authoritative mapping state from the server.
    Resync,
    Navigate(String),
}

/// A concrete change applied to the rendering surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiUpdate {
    ShowStatus(Notice),
    HideStatus,
    ShowDialog(DialogView),
    HideDialog(DialogId),
    Navigate(String),
    /// Replace the displayed mapping and mismatch lists wholesale.
    ReplaceState(Arc<MappingDocument>),
}

/// Rendering surface driven by the workbench (modal widgets, status region,
/// navigation, mapping tables).
///
/// Called from spawned timer tasks as well as from request handlers, so
/// implementations must be shareable across tasks.
pub trait Presentation: Send + Sync + 'static {
    fn apply(&self, update: UiUpdate);
}
