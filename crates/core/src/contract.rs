//! Request/response contract with the mapping server.
//!
//! Every state-mutating request is a `POST` answered by an [`ActionResult`].
//! [`Command`] names each request together with its body and the messages
//! shown when it settles.

use serde::{Deserialize, Serialize};

use crate::mapping::{FieldMapping, MismatchResolution};

/// Reply to every mutating request.
///
/// A reply without a `success` key counts as a refusal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    #[serde(default)]
    pub success: bool,
    /// Optional server-side explanation, usually present on refusal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn refused(error: Option<String>) -> Self {
        Self {
            success: false,
            error,
        }
    }
}

/// Body of `/edit_mapping`: the identity before the edit plus the new values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditMappingRequest {
    pub old_j1_field: String,
    #[serde(flatten)]
    pub mapping: FieldMapping,
}

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

/// Server endpoints known to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    AddMapping,
    EditMapping,
    ResolveMismatch,
    SaveMapping,
    GenerateOutput,
    UndoChanges,
    DownloadOutput,
    Mappings,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Self::AddMapping => "/add_mapping",
            Self::EditMapping => "/edit_mapping",
            Self::ResolveMismatch => "/resolve_mismatch",
            Self::SaveMapping => "/save_mapping",
            Self::GenerateOutput => "/generate_output",
            Self::UndoChanges => "/undo_changes",
            Self::DownloadOutput => "/download_output",
            Self::Mappings => "/mappings",
        }
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// A mutating request to the mapping server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddMapping(FieldMapping),
    EditMapping(EditMappingRequest),
    /// Carries `{j1_field, j2_field, type}` built from a [`MismatchResolution`].
    ResolveMismatch(FieldMapping),
    SaveMapping,
    GenerateOutput,
    UndoChanges,
}

impl Command {
    pub fn edit(old_j1_field: impl Into<String>, mapping: FieldMapping) -> Self {
        Self::EditMapping(EditMappingRequest {
            old_j1_field: old_j1_field.into(),
            mapping,
        })
    }

    pub fn resolve(resolution: &MismatchResolution) -> Self {
        Self::ResolveMismatch(resolution.to_mapping())
    }

    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::AddMapping(_) => Endpoint::AddMapping,
            Self::EditMapping(_) => Endpoint::EditMapping,
            Self::ResolveMismatch(_) => Endpoint::ResolveMismatch,
            Self::SaveMapping => Endpoint::SaveMapping,
            Self::GenerateOutput => Endpoint::GenerateOutput,
            Self::UndoChanges => Endpoint::UndoChanges,
        }
    }

    /// Whether an accepted request can change server-side mapping state,
    /// and so requires the client to refetch it.
    pub fn resyncs_on_success(&self) -> bool {
        matches!(
            self,
            Self::AddMapping(_)
                | Self::EditMapping(_)
                | Self::ResolveMismatch(_)
                | Self::UndoChanges
        )
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            Self::AddMapping(_) => "Mapping added successfully",
            Self::EditMapping(_) => "Mapping updated successfully",
            Self::ResolveMismatch(_) => "Mismatch resolved successfully",
            Self::SaveMapping => "Mappings saved successfully",
            Self::GenerateOutput => "Output generated successfully",
            Self::UndoChanges => "Changes undone successfully",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::AddMapping(_) => "Failed to add mapping",
            Self::EditMapping(_) => "Failed to update mapping",
            Self::ResolveMismatch(_) => "Failed to resolve mismatch",
            Self::SaveMapping => "Failed to save mappings",
            Self::GenerateOutput => "Failed to generate output",
            Self::UndoChanges => "Failed to undo changes",
        }
    }
}
