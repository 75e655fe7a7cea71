//! # Sync Orchestration
//!
//! The end-to-end flow for one permission-setting run:
//!
//! 1. Validate the request; every check fires before the first remote
//!    call.
//! 2. Fetch the profile catalog and select targets by glob pattern.
//! 3. Read the matched profiles' current permission collections, in
//!    chunks of ten dispatched concurrently.
//! 4. Filter policy-excluded entities, resolve the requested access, and
//!    merge it into each profile's collection.
//! 5. Submit the staged documents in groups and report the outcome.
//!
//! `plan_*` stops after step 4 and returns the staged documents for
//! inspection; `set_*` runs the full flow.

mod config;
mod validation;

pub use config::{
    AssignmentRequest, FieldPermissionRequest, ObjectPermissionRequest,
    RecordTypeVisibilityRequest,
};
pub use validation::{
    validate_assignment_request, validate_field_request, validate_object_request,
    validate_record_type_request,
};

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info};

use crate::error::Error;
use crate::matcher::PatternSet;
use crate::model::{parent_entity_of, PermissionKind, Profile, ProfileUpdateDocument};
use crate::provider::{EntityCatalog, MetadataReader, MetadataWriter, ProfileCatalog};
use crate::reconcile::{
    filter_permissionable, reconcile_field_permissions, reconcile_object_permissions,
    reconcile_record_type_visibilities, ZeroEntityPolicy,
};
use crate::submit::{submit_documents, SubmitReport};

/// Profiles per metadata read call.
const METADATA_READ_CHUNK_SIZE: usize = 10;

/// Binds the pure reconciliation pipeline to a directory service.
#[derive(Clone)]
pub struct SyncEngine {
    catalog: Arc<dyn ProfileCatalog>,
    reader: Arc<dyn MetadataReader>,
    writer: Arc<dyn MetadataWriter>,
    entities: Arc<dyn EntityCatalog>,
}

impl std::fmt::Debug for SyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine").finish_non_exhaustive()
    }
}

impl SyncEngine {
    pub fn new(
        catalog: Arc<dyn ProfileCatalog>,
        reader: Arc<dyn MetadataReader>,
        writer: Arc<dyn MetadataWriter>,
        entities: Arc<dyn EntityCatalog>,
    ) -> Self {
        Self {
            catalog,
            reader,
            writer,
            entities,
        }
    }

    /// Stage field permission documents without submitting them.
    pub async fn plan_field_permissions(
        &self,
        request: &FieldPermissionRequest,
    ) -> Result<Vec<ProfileUpdateDocument>, Error> {
        validate_field_request(request)?;
        let profiles = self
            .load_profiles(&request.profiles, PermissionKind::Field)
            .await?;

        let fields: Vec<String> = request
            .fields
            .iter()
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .collect();
        let objects = distinct_parent_entities(&fields);
        let excluded = self.entities.non_permissionable_fields(&objects).await?;
        let targets = filter_permissionable(&fields, &excluded);
        if targets.is_empty() {
            match request.on_zero_entities {
                ZeroEntityPolicy::Fail => {
                    return Err(Error::not_found("permissionable fields", fields.join(",")))
                }
                ZeroEntityPolicy::Skip => {
                    debug!("no permissionable field left; staging documents with no changes");
                }
            }
        }

        info!(
            "staging field permissions for {} fields across {} profiles",
            targets.len(),
            profiles.len()
        );
        Ok(reconcile_field_permissions(&profiles, &targets, &request.access))
    }

    /// Reconcile and submit field permissions.
    pub async fn set_field_permissions(
        &self,
        request: &FieldPermissionRequest,
    ) -> Result<SubmitReport, Error> {
        let documents = self.plan_field_permissions(request).await?;
        submit_documents(&*self.writer, &documents, request.chunk_size).await
    }

    /// Stage object permission documents without submitting them.
    pub async fn plan_object_permissions(
        &self,
        request: &ObjectPermissionRequest,
    ) -> Result<Vec<ProfileUpdateDocument>, Error> {
        validate_object_request(request)?;
        let profiles = self
            .load_profiles(&request.profiles, PermissionKind::Object)
            .await?;
        let objects: Vec<String> = request
            .objects
            .iter()
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();
        info!(
            "staging object permissions for {} objects across {} profiles",
            objects.len(),
            profiles.len()
        );
        reconcile_object_permissions(&profiles, &objects, &request.access)
    }

    /// Reconcile and submit object permissions.
    pub async fn set_object_permissions(
        &self,
        request: &ObjectPermissionRequest,
    ) -> Result<SubmitReport, Error> {
        let documents = self.plan_object_permissions(request).await?;
        submit_documents(&*self.writer, &documents, request.chunk_size).await
    }

    /// Stage record-type visibility documents without submitting them.
    pub async fn plan_record_type_visibilities(
        &self,
        request: &RecordTypeVisibilityRequest,
    ) -> Result<Vec<ProfileUpdateDocument>, Error> {
        validate_record_type_request(request)?;
        let profiles = self
            .load_profiles(&request.profiles, PermissionKind::RecordType)
            .await?;
        info!(
            "staging {} record type visibilities across {} profiles",
            request.record_types.len(),
            profiles.len()
        );
        Ok(reconcile_record_type_visibilities(
            &profiles,
            &request.record_types,
        ))
    }

    /// Reconcile and submit record-type visibilities.
    pub async fn set_record_type_visibilities(
        &self,
        request: &RecordTypeVisibilityRequest,
    ) -> Result<SubmitReport, Error> {
        let documents = self.plan_record_type_visibilities(request).await?;
        submit_documents(&*self.writer, &documents, request.chunk_size).await
    }

    /// Fetch the catalog, select profiles matching the patterns, and load
    /// each match's current permission collection of `kind`.
    ///
    /// Reads go out in chunks of [`METADATA_READ_CHUNK_SIZE`], all
    /// dispatched concurrently and joined before merging.
    async fn load_profiles(
        &self,
        patterns: &[String],
        kind: PermissionKind,
    ) -> Result<Vec<Profile>, Error> {
        let matcher = PatternSet::new(patterns)?;
        let handles = self.catalog.list_profiles().await?;
        let total = handles.len();
        let mut profiles: Vec<Profile> = handles
            .into_iter()
            .filter(|h| matcher.is_match(&h.name))
            .map(Profile::from_handle)
            .collect();
        if profiles.is_empty() {
            return Err(Error::not_found("profiles", patterns.join(",")));
        }
        debug!("matched {} of {} profiles", profiles.len(), total);

        let canonical_names: Vec<String> =
            profiles.iter().map(|p| p.canonical_name.clone()).collect();
        let reads = join_all(
            canonical_names
                .chunks(METADATA_READ_CHUNK_SIZE)
                .map(|chunk| self.reader.read_profiles(chunk, kind)),
        )
        .await;

        for read in reads {
            for document in read? {
                let Some(profile) = profiles
                    .iter_mut()
                    .find(|p| p.canonical_name == document.canonical_name)
                else {
                    continue;
                };
                match kind {
                    PermissionKind::Field => {
                        profile.field_permissions = document.field_permissions;
                    }
                    PermissionKind::Object => {
                        profile.object_permissions = document.object_permissions;
                    }
                    PermissionKind::RecordType => {
                        profile.record_type_visibilities = document.record_type_visibilities;
                    }
                }
            }
        }
        Ok(profiles)
    }
}

/// Distinct parent entities of a list of qualified field names, in
/// first-seen order.
fn distinct_parent_entities(fields: &[String]) -> Vec<String> {
    let mut objects: Vec<String> = Vec::new();
    for field in fields {
        let parent = parent_entity_of(field);
        if !objects.iter().any(|o| o.eq_ignore_ascii_case(parent)) {
            objects.push(parent.to_string());
        }
    }
    objects
}
