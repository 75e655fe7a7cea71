//! Request configuration for each permission kind.
//!
//! Requests deserialize from camelCase documents with defaulted optional
//! fields, so a caller can hand the engine a parsed config file or build
//! the structs directly.

use serde::Deserialize;

use crate::reconcile::ZeroEntityPolicy;
use crate::rules::{FieldAccess, ObjectAccess, RecordTypeUpdate};
use crate::submit::DEFAULT_CHUNK_SIZE;

pub(crate) fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

/// Request to set field-level access on matched profiles.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPermissionRequest {
    /// Glob patterns selecting target profiles by display name.
    pub profiles: Vec<String>,
    /// Qualified field names, e.g. `Account.Industry`.
    pub fields: Vec<String>,
    #[serde(default)]
    pub access: FieldAccess,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// What to do when the non-permissionable filter leaves no field.
    #[serde(default)]
    pub on_zero_entities: ZeroEntityPolicy,
}

/// Request to set object-level access on matched profiles.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectPermissionRequest {
    /// Glob patterns selecting target profiles by display name.
    pub profiles: Vec<String>,
    /// Object names, e.g. `Account`.
    pub objects: Vec<String>,
    /// At least one flag must be supplied.
    pub access: ObjectAccess,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

/// Request to set record-type visibilities on matched profiles.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordTypeVisibilityRequest {
    /// Glob patterns selecting target profiles by display name.
    pub profiles: Vec<String>,
    /// Requested visibility entries, merged in order.
    pub record_types: Vec<RecordTypeUpdate>,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

/// Request to assign a permission set to users that do not yet hold it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRequest {
    /// Display label of the permission set.
    pub permission_set: String,
    /// Usernames to assign; users already holding the set are skipped.
    pub usernames: Vec<String>,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}
