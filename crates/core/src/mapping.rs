//! Field mappings, mismatches and the mapping document held by the server.
//!
//! A [`FieldMapping`] pairs one J1 (source) field with one J2 (target) field
//! and an opaque type annotation. A [`Mismatch`] is a J1 field the server
//! could not pair; the user settles it with a [`MismatchResolution`].

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;

/// A declared correspondence between a J1 field and a J2 field.
///
/// Serializes to the `{j1_field, j2_field, type}` shape the server accepts
/// for both `/add_mapping` and `/resolve_mismatch`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// Source field; unique key among mappings.
    pub j1_field: String,
    /// Target field.
    pub j2_field: String,
    /// Mapping type (data type or transform category). Opaque to the client.
    #[serde(rename = "type")]
    pub mapping_type: String,
}

impl FieldMapping {
    pub fn new(
        j1_field: impl Into<String>,
        j2_field: impl Into<String>,
        mapping_type: impl Into<String>,
    ) -> Self {
        Self {
            j1_field: j1_field.into(),
            j2_field: j2_field.into(),
            mapping_type: mapping_type.into(),
        }
    }

    /// Form-level check applied before a mapping is submitted.
    ///
    /// Only the J1 field is required. Uniqueness across mappings is left to
    /// the server.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.j1_field.trim().is_empty() {
            return Err(CoreError::Validation("J1 field is required".to_string()));
        }
        Ok(())
    }
}

/// A detected mismatch together with the user's chosen resolution.
///
/// The source side (`j1_field`, `j1_type`) is fixed for the lifetime of the
/// resolve dialog; only the resolved side is editable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MismatchResolution {
    pub j1_field: String,
    pub j1_type: String,
    pub resolved_j2_field: String,
    pub resolved_type: String,
}

impl MismatchResolution {
    /// Start a resolution for a mismatch with an empty resolved side.
    pub fn for_mismatch(j1_field: impl Into<String>, j1_type: impl Into<String>) -> Self {
        Self {
            j1_field: j1_field.into(),
            j1_type: j1_type.into(),
            ..Self::default()
        }
    }

    /// The mapping the server records once this resolution is accepted.
    pub fn to_mapping(&self) -> FieldMapping {
        FieldMapping::new(
            self.j1_field.clone(),
            self.resolved_j2_field.clone(),
            self.resolved_type.clone(),
        )
    }
}

// ---------------------------------------------------------------------------
// Colour classification
// ---------------------------------------------------------------------------

/// Display colour attached to mappings and mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeColor {
    #[serde(alias = "green", alias = "GREEN")]
    Green,
    #[serde(alias = "yellow", alias = "YELLOW")]
    Yellow,
    #[serde(alias = "purple", alias = "PURPLE")]
    Purple,
    #[serde(alias = "red", alias = "RED")]
    Red,
}

impl TypeColor {
    /// Classify a mapping type the same way the server does when it stores
    /// a new mapping.
    pub fn for_type(mapping_type: &str) -> Self {
        match mapping_type {
            "str" | "float" | "number" => Self::Green,
            "boolean" => Self::Yellow,
            "null" => Self::Purple,
            _ => Self::Red,
        }
    }

    /// Parse a colour name in any letter case.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "green" => Some(Self::Green),
            "yellow" => Some(Self::Yellow),
            "purple" => Some(Self::Purple),
            "red" => Some(Self::Red),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Green => "Green",
            Self::Yellow => "Yellow",
            Self::Purple => "Purple",
            Self::Red => "Red",
        }
    }
}

/// Reads a row's `color`, treating unknown names and non-string values as
/// absent so the row falls back to [`TypeColor::for_type`].
fn lenient_color<'de, D>(deserializer: D) -> Result<Option<TypeColor>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(TypeColor::from_name))
}

// ---------------------------------------------------------------------------
// Mapping document
// ---------------------------------------------------------------------------

/// A mapping row as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRow {
    #[serde(flatten)]
    pub mapping: FieldMapping,
    #[serde(
        default,
        deserialize_with = "lenient_color",
        skip_serializing_if = "Option::is_none"
    )]
    pub color: Option<TypeColor>,
}

impl MappingRow {
    /// Server-provided colour, or the classification of the row's type.
    pub fn color(&self) -> TypeColor {
        self.color
            .unwrap_or_else(|| TypeColor::for_type(&self.mapping.mapping_type))
    }
}

/// A J1 field still waiting for manual resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    pub j1_field: String,
    pub j1_type: String,
    #[serde(
        default,
        deserialize_with = "lenient_color",
        skip_serializing_if = "Option::is_none"
    )]
    pub color: Option<TypeColor>,
}

impl Mismatch {
    pub fn color(&self) -> TypeColor {
        self.color.unwrap_or_else(|| TypeColor::for_type(&self.j1_type))
    }

    /// An empty resolution for this mismatch, ready to prefill a dialog.
    pub fn resolution(&self) -> MismatchResolution {
        MismatchResolution::for_mismatch(self.j1_field.clone(), self.j1_type.clone())
    }
}

/// Authoritative mapping state as held by the server.
///
/// Clients replace their copy wholesale after every successful mutation;
/// they never patch it locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingDocument {
    #[serde(default)]
    pub mappings: Vec<MappingRow>,
    #[serde(default)]
    pub mismatches: Vec<Mismatch>,
}

impl MappingDocument {
    /// Look up a mapping by its J1 identity.
    pub fn mapping(&self, j1_field: &str) -> Option<&MappingRow> {
        self.mappings.iter().find(|r| r.mapping.j1_field == j1_field)
    }

    /// Look up an open mismatch by its J1 field.
    pub fn mismatch(&self, j1_field: &str) -> Option<&Mismatch> {
        self.mismatches.iter().find(|m| m.j1_field == j1_field)
    }
}
