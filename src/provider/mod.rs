//! # Directory Service Collaborators
//!
//! Capability traits for the remote directory service the engine runs
//! against. The engine only ever sees these traits; authentication,
//! transport, and retry policy all live behind the implementations.
//!
//! All methods return `anyhow::Result` so implementations can surface
//! their own error context; the engine wraps failures outside submission
//! as [`Error::Remote`](crate::error::Error).

use std::collections::HashSet;

use anyhow::Result;
use async_trait::async_trait;

use crate::model::{
    PermissionKind, PermissionSetAssignment, PermissionSetRef, ProfileHandle,
    ProfileUpdateDocument, SubmitResult, UserRef,
};

/// Catalog query capability: the profiles known to the directory.
#[async_trait]
pub trait ProfileCatalog: Send + Sync {
    /// List every known profile with its id, display name, and canonical
    /// metadata name.
    async fn list_profiles(&self) -> Result<Vec<ProfileHandle>>;
}

/// Metadata read capability: a profile's current permission collections.
#[async_trait]
pub trait MetadataReader: Send + Sync {
    /// Read the permission collection of `kind` for each requested
    /// profile. Returned documents carry the canonical name they belong
    /// to; profiles unknown to the remote may be omitted.
    async fn read_profiles(
        &self,
        canonical_names: &[String],
        kind: PermissionKind,
    ) -> Result<Vec<ProfileUpdateDocument>>;
}

/// Metadata write capability: apply update documents, one result per item.
#[async_trait]
pub trait MetadataWriter: Send + Sync {
    /// Apply the update documents and report per-item success/failure.
    /// A group-level `Err` means the whole call failed in transport.
    async fn update_profiles(
        &self,
        documents: &[ProfileUpdateDocument],
    ) -> Result<Vec<SubmitResult>>;
}

/// Entity catalog capability: which fields are excluded from individual
/// permission assignment by policy.
#[async_trait]
pub trait EntityCatalog: Send + Sync {
    /// Qualified names of the non-permissionable fields among the given
    /// objects.
    async fn non_permissionable_fields(&self, objects: &[String]) -> Result<HashSet<String>>;
}

/// Permission-set assignment capability.
#[async_trait]
pub trait AssignmentStore: Send + Sync {
    /// Look up a permission set by its display label.
    async fn find_permission_set(&self, label: &str) -> Result<Option<PermissionSetRef>>;

    /// Active users among `usernames` that do not yet hold the permission
    /// set.
    async fn unassigned_users(
        &self,
        permission_set_id: &str,
        usernames: &[String],
    ) -> Result<Vec<UserRef>>;

    /// Create the staged assignments and report per-item success/failure.
    async fn create_assignments(
        &self,
        assignments: &[PermissionSetAssignment],
    ) -> Result<Vec<SubmitResult>>;
}
