//! Object-level access resolution.
//!
//! Implication rules, applied in order until stable:
//!
//! 1. `create = true` grants `read`
//! 2. `edit = true` grants `read`; `edit = false` revokes `delete`
//! 3. `delete = true` grants `read` and `edit`
//! 4. `view_all = true` grants `read`; `view_all = false` revokes
//!    `modify_all`
//! 5. `modify_all = true` grants `read`, `edit`, `delete` and `view_all`
//! 6. `read = false` revokes everything else
//!
//! The rules run twice: first over the requested flags alone (so an
//! explicit `edit=true` pulls `read=true` into the request), then over the
//! final concrete tuple after existing values and defaults fill the gaps
//! (so an inconsistent existing record cannot leak an invariant
//! violation).

use serde::Deserialize;

use crate::error::Error;
use crate::model::ObjectPermission;

/// Requested object-level access. Unset flags fall back to the existing
/// record's value, then to the default policy.
///
/// Default policy for flags left unset by both the request and the
/// existing record: `read`, `create`, `edit` and `view_all` default to
/// true; `delete` and `modify_all` default to false and must be granted
/// explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectAccess {
    #[serde(default)]
    pub read: Option<bool>,
    #[serde(default)]
    pub create: Option<bool>,
    #[serde(default)]
    pub edit: Option<bool>,
    #[serde(default)]
    pub delete: Option<bool>,
    #[serde(default)]
    pub view_all: Option<bool>,
    #[serde(default)]
    pub modify_all: Option<bool>,
}

impl ObjectAccess {
    /// True when no flag was supplied at all.
    #[must_use]
    pub fn is_unspecified(&self) -> bool {
        self.read.is_none()
            && self.create.is_none()
            && self.edit.is_none()
            && self.delete.is_none()
            && self.view_all.is_none()
            && self.modify_all.is_none()
    }

    /// Resolve the requested flags against an existing record into a
    /// consistent permission tuple for `object`.
    ///
    /// Fails with a validation error when no flag was supplied: at least
    /// one explicit intent is required.
    pub fn resolve(
        &self,
        object: &str,
        existing: Option<&ObjectPermission>,
    ) -> Result<ObjectPermission, Error> {
        if self.is_unspecified() {
            return Err(Error::validation(format!(
                "at least one access flag must be specified for object '{object}'"
            )));
        }

        let requested = self.imply();
        let mut resolved = ObjectPermission {
            object: object.to_string(),
            allow_read: requested
                .read
                .or(existing.map(|e| e.allow_read))
                .unwrap_or(true),
            allow_create: requested
                .create
                .or(existing.map(|e| e.allow_create))
                .unwrap_or(true),
            allow_edit: requested
                .edit
                .or(existing.map(|e| e.allow_edit))
                .unwrap_or(true),
            allow_delete: requested
                .delete
                .or(existing.map(|e| e.allow_delete))
                .unwrap_or(false),
            view_all_records: requested
                .view_all
                .or(existing.map(|e| e.view_all_records))
                .unwrap_or(true),
            modify_all_records: requested
                .modify_all
                .or(existing.map(|e| e.modify_all_records))
                .unwrap_or(false),
        };
        normalize_object_permission(&mut resolved);
        Ok(resolved)
    }

    /// Apply the implication rules to the requested flags alone, leaving
    /// unset flags unset. Loops until stable; the rule graph settles in
    /// one pass.
    fn imply(&self) -> Self {
        let mut flags = *self;
        loop {
            let before = flags;
            if flags.create == Some(true) {
                flags.read = Some(true);
            }
            match flags.edit {
                Some(true) => flags.read = Some(true),
                Some(false) => flags.delete = Some(false),
                None => {}
            }
            if flags.delete == Some(true) {
                flags.read = Some(true);
                flags.edit = Some(true);
            }
            match flags.view_all {
                Some(true) => flags.read = Some(true),
                Some(false) => flags.modify_all = Some(false),
                None => {}
            }
            if flags.modify_all == Some(true) {
                flags.read = Some(true);
                flags.edit = Some(true);
                flags.delete = Some(true);
                flags.view_all = Some(true);
            }
            if flags.read == Some(false) {
                flags.create = Some(false);
                flags.edit = Some(false);
                flags.delete = Some(false);
                flags.view_all = Some(false);
                flags.modify_all = Some(false);
            }
            if flags == before {
                return flags;
            }
        }
    }
}

/// Run the implication rules over a concrete permission tuple until it is
/// stable. Idempotent; the output always satisfies the record invariants.
pub fn normalize_object_permission(perm: &mut ObjectPermission) {
    loop {
        let before = perm.clone();
        if perm.allow_create {
            perm.allow_read = true;
        }
        if perm.allow_edit {
            perm.allow_read = true;
        } else {
            perm.allow_delete = false;
        }
        if perm.allow_delete {
            perm.allow_read = true;
            perm.allow_edit = true;
        }
        if perm.view_all_records {
            perm.allow_read = true;
        } else {
            perm.modify_all_records = false;
        }
        if perm.modify_all_records {
            perm.allow_read = true;
            perm.allow_edit = true;
            perm.allow_delete = true;
            perm.view_all_records = true;
        }
        if !perm.allow_read {
            perm.allow_create = false;
            perm.allow_edit = false;
            perm.allow_delete = false;
            perm.view_all_records = false;
            perm.modify_all_records = false;
        }
        if *perm == before {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn access(
        read: Option<bool>,
        create: Option<bool>,
        edit: Option<bool>,
        delete: Option<bool>,
        view_all: Option<bool>,
        modify_all: Option<bool>,
    ) -> ObjectAccess {
        ObjectAccess {
            read,
            create,
            edit,
            delete,
            view_all,
            modify_all,
        }
    }

    #[test]
    fn unspecified_access_is_rejected() {
        let err = ObjectAccess::default().resolve("Account", None).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn edit_alone_on_bare_object_pins_default_policy() {
        let resolved = access(None, None, Some(true), None, None, None)
            .resolve("Account", None)
            .unwrap();
        assert!(resolved.allow_read);
        assert!(resolved.allow_create);
        assert!(resolved.allow_edit);
        assert!(!resolved.allow_delete);
        assert!(resolved.view_all_records);
        assert!(!resolved.modify_all_records);
    }

    #[test]
    fn read_false_revokes_everything() {
        let resolved = access(Some(false), None, None, None, None, None)
            .resolve("Account", None)
            .unwrap();
        assert_eq!(resolved, ObjectPermission::denied("Account"));
    }

    #[test]
    fn modify_all_grants_the_full_tuple() {
        let resolved = access(None, None, None, None, None, Some(true))
            .resolve("Account", None)
            .unwrap();
        assert!(resolved.allow_read);
        assert!(resolved.allow_edit);
        assert!(resolved.allow_delete);
        assert!(resolved.view_all_records);
        assert!(resolved.modify_all_records);
    }

    #[test]
    fn delete_grants_read_and_edit() {
        let resolved = access(None, None, None, Some(true), None, None)
            .resolve("Case", None)
            .unwrap();
        assert!(resolved.allow_read);
        assert!(resolved.allow_edit);
        assert!(resolved.allow_delete);
        assert!(!resolved.modify_all_records);
    }

    #[test]
    fn unset_flags_preserve_existing_values() {
        let existing = ObjectPermission {
            object: "Account".to_string(),
            allow_read: false,
            allow_create: false,
            allow_edit: false,
            allow_delete: false,
            view_all_records: false,
            modify_all_records: false,
        };
        let resolved = access(None, None, Some(true), None, None, None)
            .resolve("Account", Some(&existing))
            .unwrap();
        // edit pulls read up; everything else keeps the existing value.
        assert!(resolved.allow_read);
        assert!(!resolved.allow_create);
        assert!(resolved.allow_edit);
        assert!(!resolved.allow_delete);
        assert!(!resolved.view_all_records);
        assert!(!resolved.modify_all_records);
    }

    #[test]
    fn inconsistent_existing_record_is_normalized() {
        // delete without edit cannot survive resolution
        let existing = ObjectPermission {
            object: "Account".to_string(),
            allow_read: true,
            allow_create: false,
            allow_edit: false,
            allow_delete: true,
            view_all_records: false,
            modify_all_records: false,
        };
        let resolved = access(None, Some(true), None, None, None, None)
            .resolve("Account", Some(&existing))
            .unwrap();
        assert!(resolved.allow_create);
        assert!(!resolved.allow_edit);
        assert!(!resolved.allow_delete);
    }

    #[test]
    fn normalization_is_idempotent() {
        let samples = [
            access(Some(true), Some(true), None, None, None, None),
            access(None, None, Some(true), None, Some(false), None),
            access(None, None, None, None, None, Some(true)),
            access(Some(false), None, None, Some(true), None, None),
        ];
        for sample in samples {
            let mut once = sample.resolve("Account", None).unwrap();
            let twice = once.clone();
            normalize_object_permission(&mut once);
            assert_eq!(once, twice, "{sample:?}");
        }
    }

    #[test]
    fn resolved_tuples_satisfy_invariants() {
        let flag_values = [None, Some(true), Some(false)];
        for read in flag_values {
            for edit in flag_values {
                for delete in flag_values {
                    for modify_all in flag_values {
                        let sample = access(read, None, edit, delete, None, modify_all);
                        if sample.is_unspecified() {
                            continue;
                        }
                        let p = sample.resolve("Account", None).unwrap();
                        assert!(!p.allow_edit || p.allow_read, "{sample:?}");
                        assert!(!p.allow_delete || p.allow_edit, "{sample:?}");
                        assert!(
                            !p.modify_all_records
                                || (p.view_all_records && p.allow_delete),
                            "{sample:?}"
                        );
                    }
                }
            }
        }
    }
}
