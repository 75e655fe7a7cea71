//! # Metadata Reconciler
//!
//! Merges computed permission records into each matched profile's existing
//! collection and stages the result as per-profile update documents.
//!
//! For every (profile, entity) pair: an existing record for the entity is
//! replaced in place, keeping its position; anything else is appended in
//! target-entity order. Unrelated entries pass through untouched, so the
//! output is deterministic for a given input. One document is produced per
//! matched profile, even when it carries no change; callers may skip
//! submitting those.

use std::collections::HashSet;

use tracing::debug;

use crate::error::Error;
use crate::model::{
    FieldPermission, ObjectPermission, Profile, ProfileUpdateDocument, RecordTypeVisibility,
};
use crate::rules::{merge_record_type_visibilities, FieldAccess, ObjectAccess, RecordTypeUpdate};

/// What to do when the non-permissionable filter leaves no target entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ZeroEntityPolicy {
    /// Fail the run before any remote call.
    #[default]
    Fail,
    /// Produce documents with no changes and let the caller decide.
    Skip,
}

/// A permission record addressable by the entity it grants access to.
pub trait EntityKeyed {
    /// Canonical entity name, matched case-insensitively.
    fn entity_key(&self) -> &str;
}

impl EntityKeyed for FieldPermission {
    fn entity_key(&self) -> &str {
        &self.field
    }
}

impl EntityKeyed for ObjectPermission {
    fn entity_key(&self) -> &str {
        &self.object
    }
}

impl EntityKeyed for RecordTypeVisibility {
    fn entity_key(&self) -> &str {
        &self.record_type
    }
}

/// Replace the record matching `record`'s entity key in place, or append.
pub fn upsert<R: EntityKeyed>(records: &mut Vec<R>, record: R) {
    let position = records
        .iter()
        .position(|r| r.entity_key().eq_ignore_ascii_case(record.entity_key()));
    match position {
        Some(index) => records[index] = record,
        None => records.push(record),
    }
}

/// Drop entities excluded by policy, preserving order. Exclusions are
/// matched case-insensitively and logged, never treated as errors.
pub fn filter_permissionable(entities: &[String], excluded: &HashSet<String>) -> Vec<String> {
    let excluded_lower: HashSet<String> = excluded.iter().map(|e| e.to_lowercase()).collect();
    entities
        .iter()
        .filter(|entity| {
            let keep = !excluded_lower.contains(&entity.to_lowercase());
            if !keep {
                debug!("excluding non-permissionable entity: {}", entity);
            }
            keep
        })
        .cloned()
        .collect()
}

/// Merge the resolved field access for every target field into each
/// profile's field permission list.
pub fn reconcile_field_permissions(
    profiles: &[Profile],
    fields: &[String],
    access: &FieldAccess,
) -> Vec<ProfileUpdateDocument> {
    profiles
        .iter()
        .map(|profile| {
            let mut records = profile.field_permissions.clone();
            for field in fields {
                upsert(&mut records, access.permission_for(field.clone()));
            }
            ProfileUpdateDocument {
                canonical_name: profile.canonical_name.clone(),
                field_permissions: records,
                ..ProfileUpdateDocument::default()
            }
        })
        .collect()
}

/// Resolve the requested object access against each profile's existing
/// record per target object and merge the results.
pub fn reconcile_object_permissions(
    profiles: &[Profile],
    objects: &[String],
    access: &ObjectAccess,
) -> Result<Vec<ProfileUpdateDocument>, Error> {
    profiles
        .iter()
        .map(|profile| {
            let mut records = profile.object_permissions.clone();
            for object in objects {
                let existing = records
                    .iter()
                    .find(|r| r.object.eq_ignore_ascii_case(object));
                let resolved = access.resolve(object, existing)?;
                upsert(&mut records, resolved);
            }
            Ok(ProfileUpdateDocument {
                canonical_name: profile.canonical_name.clone(),
                object_permissions: records,
                ..ProfileUpdateDocument::default()
            })
        })
        .collect()
}

/// Merge the requested record-type visibility entries into each profile's
/// existing list, enforcing one default per parent entity.
pub fn reconcile_record_type_visibilities(
    profiles: &[Profile],
    updates: &[RecordTypeUpdate],
) -> Vec<ProfileUpdateDocument> {
    profiles
        .iter()
        .map(|profile| {
            let mut records = profile.record_type_visibilities.clone();
            merge_record_type_visibilities(&mut records, updates);
            ProfileUpdateDocument {
                canonical_name: profile.canonical_name.clone(),
                record_type_visibilities: records,
                ..ProfileUpdateDocument::default()
            }
        })
        .collect()
}
