//! Profile identity and per-run catalog snapshot.

use serde::{Deserialize, Serialize};

use super::permissions::{FieldPermission, ObjectPermission, RecordTypeVisibility};

/// Catalog identity of a profile as returned by the directory service.
///
/// `name` is the human label shown to operators; `canonical_name` is the
/// system-of-record metadata name and may differ in encoding. Update
/// documents are keyed by `canonical_name`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileHandle {
    /// Opaque remote identifier.
    pub id: String,
    /// Human-readable display name.
    pub name: String,
    /// System-of-record metadata name.
    pub canonical_name: String,
}

/// One profile's catalog identity plus the permission collections fetched
/// for the current run.
///
/// Identity is immutable; the permission collections are the working state
/// the reconciler merges into. A `Profile` never outlives a single
/// invocation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub canonical_name: String,
    #[serde(default)]
    pub field_permissions: Vec<FieldPermission>,
    #[serde(default)]
    pub object_permissions: Vec<ObjectPermission>,
    #[serde(default)]
    pub record_type_visibilities: Vec<RecordTypeVisibility>,
}

impl Profile {
    /// A profile with empty permission collections, ready to receive the
    /// collections read for the requested kind.
    #[must_use]
    pub fn from_handle(handle: ProfileHandle) -> Self {
        Self {
            id: handle.id,
            name: handle.name,
            canonical_name: handle.canonical_name,
            field_permissions: Vec::new(),
            object_permissions: Vec::new(),
            record_type_visibilities: Vec::new(),
        }
    }
}
