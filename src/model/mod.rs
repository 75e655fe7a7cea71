//! # Data Model
//!
//! Owned types for one reconciliation run: the profile catalog snapshot,
//! the three permission record kinds, the per-profile update document
//! staged for submission, and the per-item remote outcome.
//!
//! All wire-facing types serialize with camelCase field names to match the
//! remote metadata document shape.

mod assignment;
mod document;
mod permissions;
mod profile;

pub use assignment::{PermissionSetAssignment, PermissionSetRef, UserRef};
pub use document::{ProfileUpdateDocument, SubmitResult};
pub use permissions::{
    FieldPermission, ObjectPermission, PermissionKind, RecordTypeVisibility,
};
pub(crate) use permissions::parent_entity_of;
pub use profile::{Profile, ProfileHandle};
