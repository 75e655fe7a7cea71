//! Permission-set assignment records.

use serde::{Deserialize, Serialize};

/// Identity of a permission set resolved from its display label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSetRef {
    pub id: String,
    pub label: String,
}

/// A user eligible for assignment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub id: String,
    pub name: String,
    pub username: String,
}

/// One staged permission-set assignment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSetAssignment {
    pub permission_set_id: String,
    pub assignee_id: String,
    /// Kept alongside the opaque id so failures can be reported by
    /// username.
    pub assignee_username: String,
}
