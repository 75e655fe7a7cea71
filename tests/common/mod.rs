//! Common test utilities: an in-memory directory service and assignment
//! store the engines run against.

#![allow(dead_code, reason = "not every test binary uses every helper")]

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, Once};

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use permission_reconciler::model::{
    PermissionKind, PermissionSetAssignment, PermissionSetRef, ProfileHandle,
    ProfileUpdateDocument, SubmitResult, UserRef,
};
use permission_reconciler::provider::{
    AssignmentStore, EntityCatalog, MetadataReader, MetadataWriter, ProfileCatalog,
};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing output for tests. Guarded by a `Once` so every test
/// can call it; log verbosity follows `RUST_LOG`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// In-memory directory service. Profiles, their metadata documents, and
/// the non-permissionable field set are fixed at construction; update
/// calls are recorded for inspection.
#[derive(Default)]
pub struct MockDirectory {
    pub profiles: Vec<ProfileHandle>,
    pub metadata: HashMap<String, ProfileUpdateDocument>,
    pub non_permissionable: HashSet<String>,
    /// Canonical names whose updates report an item-level failure.
    pub failing_items: HashSet<String>,
    /// Canonical names whose presence makes the whole group call fail.
    pub failing_groups: HashSet<String>,
    /// Every group of documents received by `update_profiles`.
    pub update_calls: Mutex<Vec<Vec<ProfileUpdateDocument>>>,
}

impl MockDirectory {
    pub fn with_profiles(names: &[&str]) -> Self {
        let profiles = names
            .iter()
            .enumerate()
            .map(|(index, name)| ProfileHandle {
                id: format!("00e{index:03}"),
                name: (*name).to_string(),
                canonical_name: name.replace(' ', "%20"),
            })
            .collect();
        Self {
            profiles,
            ..Self::default()
        }
    }

    pub fn recorded_groups(&self) -> Vec<Vec<ProfileUpdateDocument>> {
        self.update_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileCatalog for MockDirectory {
    async fn list_profiles(&self) -> Result<Vec<ProfileHandle>> {
        Ok(self.profiles.clone())
    }
}

#[async_trait]
impl MetadataReader for MockDirectory {
    async fn read_profiles(
        &self,
        canonical_names: &[String],
        _kind: PermissionKind,
    ) -> Result<Vec<ProfileUpdateDocument>> {
        Ok(canonical_names
            .iter()
            .filter_map(|name| self.metadata.get(name).cloned())
            .collect())
    }
}

#[async_trait]
impl MetadataWriter for MockDirectory {
    async fn update_profiles(
        &self,
        documents: &[ProfileUpdateDocument],
    ) -> Result<Vec<SubmitResult>> {
        self.update_calls.lock().unwrap().push(documents.to_vec());
        if documents
            .iter()
            .any(|d| self.failing_groups.contains(&d.canonical_name))
        {
            return Err(anyhow!("metadata service unavailable"));
        }
        Ok(documents
            .iter()
            .map(|d| {
                if self.failing_items.contains(&d.canonical_name) {
                    SubmitResult::failed(d.canonical_name.clone(), "insufficient access")
                } else {
                    SubmitResult::ok(d.canonical_name.clone())
                }
            })
            .collect())
    }
}

#[async_trait]
impl EntityCatalog for MockDirectory {
    async fn non_permissionable_fields(&self, _objects: &[String]) -> Result<HashSet<String>> {
        Ok(self.non_permissionable.clone())
    }
}

/// In-memory assignment store.
#[derive(Default)]
pub struct MockAssignmentStore {
    pub permission_sets: Vec<PermissionSetRef>,
    pub users: Vec<UserRef>,
    /// `(permission_set_id, user_id)` pairs already assigned.
    pub assigned: HashSet<(String, String)>,
    /// Usernames whose assignment reports an item-level failure.
    pub failing_usernames: HashSet<String>,
    pub created: Mutex<Vec<Vec<PermissionSetAssignment>>>,
}

impl MockAssignmentStore {
    pub fn recorded_groups(&self) -> Vec<Vec<PermissionSetAssignment>> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssignmentStore for MockAssignmentStore {
    async fn find_permission_set(&self, label: &str) -> Result<Option<PermissionSetRef>> {
        Ok(self
            .permission_sets
            .iter()
            .find(|p| p.label == label)
            .cloned())
    }

    async fn unassigned_users(
        &self,
        permission_set_id: &str,
        usernames: &[String],
    ) -> Result<Vec<UserRef>> {
        Ok(self
            .users
            .iter()
            .filter(|u| usernames.contains(&u.username))
            .filter(|u| {
                !self
                    .assigned
                    .contains(&(permission_set_id.to_string(), u.id.clone()))
            })
            .cloned()
            .collect())
    }

    async fn create_assignments(
        &self,
        assignments: &[PermissionSetAssignment],
    ) -> Result<Vec<SubmitResult>> {
        self.created.lock().unwrap().push(assignments.to_vec());
        Ok(assignments
            .iter()
            .map(|a| {
                if self.failing_usernames.contains(&a.assignee_username) {
                    SubmitResult::failed(a.assignee_username.clone(), "duplicate assignment")
                } else {
                    SubmitResult::ok(a.assignee_username.clone())
                }
            })
            .collect())
    }
}
