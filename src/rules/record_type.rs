//! Record-type visibility resolution and merging.

use serde::Deserialize;

use crate::error::Error;
use crate::model::{parent_entity_of, RecordTypeVisibility};

/// One requested record-type visibility change.
///
/// `visible` is required. `default` resolves to false when unspecified.
/// `person_account_default` left unspecified preserves the prior value for
/// an entry that already exists and resolves to false for a new one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordTypeUpdate {
    /// Qualified record type name, e.g. `Case.Support`.
    #[serde(rename = "name")]
    pub record_type: String,
    pub visible: bool,
    #[serde(default)]
    pub default: Option<bool>,
    #[serde(default)]
    pub person_account_default: Option<bool>,
}

impl RecordTypeUpdate {
    /// Parse a JSON array of requested visibility entries, e.g.
    /// `[{"name":"Case.Support","visible":true,"default":true}]`.
    ///
    /// Fails with a validation error when the document is not an array or
    /// an entry is missing its `name` or `visible` property.
    pub fn parse_list(json: &str) -> Result<Vec<Self>, Error> {
        let updates: Vec<Self> = serde_json::from_str(json).map_err(|e| {
            Error::validation(format!("record types must be a JSON array of entries: {e}"))
        })?;
        for update in &updates {
            update.validate()?;
        }
        Ok(updates)
    }

    /// Reject entries with an empty record type name.
    pub fn validate(&self) -> Result<(), Error> {
        if self.record_type.trim().is_empty() {
            return Err(Error::validation(
                "a record type entry is missing its name",
            ));
        }
        Ok(())
    }

    /// The parent entity segment of the record type name.
    #[must_use]
    pub fn parent_entity(&self) -> &str {
        parent_entity_of(&self.record_type)
    }
}

/// Merge requested visibility entries into a profile's existing list.
///
/// Entries merge by case-insensitive record type name: a match is replaced
/// in place, anything else is appended in request order. Applying an entry
/// with `default = true` first clears the default on every other entry
/// sharing the parent entity, including entries merged earlier in the
/// same call, so the last requested default wins.
pub fn merge_record_type_visibilities(
    existing: &mut Vec<RecordTypeVisibility>,
    updates: &[RecordTypeUpdate],
) {
    for update in updates {
        if update.default == Some(true) {
            let parent = update.parent_entity();
            for entry in existing.iter_mut() {
                if entry.parent_entity().eq_ignore_ascii_case(parent) {
                    entry.is_default = false;
                }
            }
        }

        let position = existing
            .iter()
            .position(|e| e.record_type.eq_ignore_ascii_case(&update.record_type));
        match position {
            Some(index) => {
                let entry = &mut existing[index];
                entry.record_type = update.record_type.clone();
                entry.visible = update.visible;
                entry.is_default = update.default.unwrap_or(false);
                if let Some(pad) = update.person_account_default {
                    entry.person_account_default = pad;
                }
            }
            None => existing.push(RecordTypeVisibility {
                record_type: update.record_type.clone(),
                visible: update.visible,
                is_default: update.default.unwrap_or(false),
                person_account_default: update.person_account_default.unwrap_or(false),
            }),
        }
    }
}
