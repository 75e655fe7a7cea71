//! Update documents and per-item remote outcomes.

use serde::{Deserialize, Serialize};

use super::permissions::{FieldPermission, ObjectPermission, RecordTypeVisibility};

/// Per-profile bundle of permission collections staged for submission.
///
/// Keyed by the profile's canonical name. A run populates exactly one of
/// the three collections; the others stay empty and are omitted from the
/// serialized document. Built sequentially, submitted once; never mutated
/// concurrently with its own submission.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateDocument {
    /// Canonical metadata name of the target profile.
    pub canonical_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_permissions: Vec<FieldPermission>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub object_permissions: Vec<ObjectPermission>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub record_type_visibilities: Vec<RecordTypeVisibility>,
}

impl ProfileUpdateDocument {
    /// An empty document for `canonical_name`.
    #[must_use]
    pub fn new(canonical_name: impl Into<String>) -> Self {
        Self {
            canonical_name: canonical_name.into(),
            ..Self::default()
        }
    }

    /// True when no permission collection carries any entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.field_permissions.is_empty()
            && self.object_permissions.is_empty()
            && self.record_type_visibilities.is_empty()
    }
}

/// Per-item outcome of a remote write.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResult {
    /// Canonical name of the item the remote reported on.
    pub name: String,
    pub success: bool,
    /// Remote error messages; empty on success.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl SubmitResult {
    /// A successful outcome for `name`.
    #[must_use]
    pub fn ok(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success: true,
            errors: Vec::new(),
        }
    }

    /// A failed outcome for `name` with one error message.
    #[must_use]
    pub fn failed(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success: false,
            errors: vec![error.into()],
        }
    }
}
