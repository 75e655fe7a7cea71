//! # Access Summary
//!
//! Entity-centric preview of a planned update: for each target entity, the
//! access that will be applied and the display names of the profiles
//! receiving it.
//!
//! Entries keep insertion order (the order entities are first seen across
//! the planned documents), so a summary is reproducible for a given plan.

use serde::Serialize;
use serde_json::Value;

use crate::model::{Profile, ProfileUpdateDocument};
use crate::reconcile::EntityKeyed;

/// Planned access for one entity across all matched profiles.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessSummaryEntry {
    /// Canonical entity name.
    pub entity: String,
    /// The permission record that will be applied, as a JSON value.
    pub access: Value,
    /// Display names of the profiles receiving the record, deduplicated,
    /// in first-seen order.
    pub profiles: Vec<String>,
}

/// Insertion-ordered summary keyed by canonical entity name.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct AccessSummary {
    entries: Vec<AccessSummaryEntry>,
}

impl AccessSummary {
    /// Summarize planned documents, keeping only records whose entity is
    /// among `targets` (matched case-insensitively).
    ///
    /// `profiles` maps each document's canonical name back to the
    /// profile's display name; documents without a matching profile fall
    /// back to the canonical name itself.
    #[must_use]
    pub fn from_documents(
        documents: &[ProfileUpdateDocument],
        profiles: &[Profile],
        targets: &[String],
    ) -> Self {
        let mut summary = Self::default();
        for doc in documents {
            let display_name = profiles
                .iter()
                .find(|p| p.canonical_name == doc.canonical_name)
                .map_or(doc.canonical_name.as_str(), |p| p.name.as_str());
            for record in &doc.field_permissions {
                summary.record(record, display_name, targets);
            }
            for record in &doc.object_permissions {
                summary.record(record, display_name, targets);
            }
            for record in &doc.record_type_visibilities {
                summary.record(record, display_name, targets);
            }
        }
        summary
    }

    /// The summarized entries, in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[AccessSummaryEntry] {
        &self.entries
    }

    /// True when no planned record matched a target entity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn record<R>(&mut self, record: &R, profile_name: &str, targets: &[String])
    where
        R: EntityKeyed + Serialize,
    {
        let key = record.entity_key();
        if !targets.iter().any(|t| t.eq_ignore_ascii_case(key)) {
            return;
        }
        let access = serde_json::to_value(record).unwrap_or(Value::Null);
        match self
            .entries
            .iter_mut()
            .find(|e| e.entity.eq_ignore_ascii_case(key))
        {
            Some(entry) => {
                entry.access = access;
                if !entry.profiles.iter().any(|p| p == profile_name) {
                    entry.profiles.push(profile_name.to_string());
                }
            }
            None => self.entries.push(AccessSummaryEntry {
                entity: key.to_string(),
                access,
                profiles: vec![profile_name.to_string()],
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProfileHandle;
    use crate::reconcile::reconcile_field_permissions;
    use crate::rules::FieldAccess;

    fn profile(name: &str, canonical: &str) -> Profile {
        Profile::from_handle(ProfileHandle {
            id: format!("id-{name}"),
            name: name.to_string(),
            canonical_name: canonical.to_string(),
        })
    }

    #[test]
    fn summary_groups_profiles_by_entity_in_insertion_order() {
        let profiles = vec![
            profile("Standard User", "Standard%20User"),
            profile("Read Only", "Read%20Only"),
        ];
        let targets = vec!["Account.Name".to_string(), "Account.Industry".to_string()];
        let docs = reconcile_field_permissions(&profiles, &targets, &FieldAccess::default());
        let summary = AccessSummary::from_documents(&docs, &profiles, &targets);

        let entities: Vec<&str> = summary.entries().iter().map(|e| e.entity.as_str()).collect();
        assert_eq!(entities, vec!["Account.Name", "Account.Industry"]);
        assert_eq!(
            summary.entries()[0].profiles,
            vec!["Standard User".to_string(), "Read Only".to_string()]
        );
        assert_eq!(summary.entries()[0].access["readable"], true);
    }

    #[test]
    fn untargeted_existing_entries_are_left_out() {
        let mut existing = profile("Standard User", "Standard%20User");
        existing.field_permissions =
            vec![FieldAccess::default().permission_for("Account.Rating")];
        let targets = vec!["Account.Name".to_string()];
        let docs =
            reconcile_field_permissions(&[existing.clone()], &targets, &FieldAccess::default());
        let summary = AccessSummary::from_documents(&docs, &[existing], &targets);
        assert_eq!(summary.entries().len(), 1);
        assert_eq!(summary.entries()[0].entity, "Account.Name");
    }
}
