//! Permission record kinds and their invariants.

use serde::{Deserialize, Serialize};

/// Which permission collection a metadata read or update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionKind {
    /// Field-level read/edit access.
    Field,
    /// Object-level CRUD and org-wide access.
    Object,
    /// Record-type visibility and defaults.
    RecordType,
}

/// Field-level permission for one field in one profile.
///
/// Invariant: `editable` implies `readable`; edit access cannot be
/// granted without read access.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPermission {
    /// Qualified field name, e.g. `Account.Industry`.
    pub field: String,
    pub readable: bool,
    pub editable: bool,
}

/// Object-level permission for one object in one profile.
///
/// Invariants: `allow_create`, `allow_edit` and `view_all_records` each
/// imply `allow_read`; `allow_delete` implies `allow_edit`;
/// `modify_all_records` implies `allow_delete` and `view_all_records`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectPermission {
    /// Object name, e.g. `Account`.
    pub object: String,
    pub allow_read: bool,
    pub allow_create: bool,
    pub allow_edit: bool,
    pub allow_delete: bool,
    pub view_all_records: bool,
    pub modify_all_records: bool,
}

impl ObjectPermission {
    /// An all-false permission record for `object`, the base value when a
    /// profile has no existing record for it.
    #[must_use]
    pub fn denied(object: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            allow_read: false,
            allow_create: false,
            allow_edit: false,
            allow_delete: false,
            view_all_records: false,
            modify_all_records: false,
        }
    }
}

/// Record-type visibility entry for one record type in one profile.
///
/// At most one entry per parent entity may have `is_default = true`;
/// setting a new default clears the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordTypeVisibility {
    /// Qualified record type name, e.g. `Case.Support`.
    pub record_type: String,
    pub visible: bool,
    #[serde(rename = "default")]
    pub is_default: bool,
    #[serde(default)]
    pub person_account_default: bool,
}

impl RecordTypeVisibility {
    /// The parent entity segment of the record type name (the part before
    /// the first `.`, or the whole name when unqualified).
    #[must_use]
    pub fn parent_entity(&self) -> &str {
        parent_entity_of(&self.record_type)
    }
}

/// Parent entity segment of a qualified record type name.
pub(crate) fn parent_entity_of(record_type: &str) -> &str {
    record_type.split('.').next().unwrap_or(record_type)
}
