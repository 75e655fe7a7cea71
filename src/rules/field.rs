//! Field-level access resolution.

use serde::Deserialize;

use crate::model::FieldPermission;

/// Requested field-level access.
///
/// Both flags default when unset: `visible = true`, `readonly = false`.
/// Resolution: `readable = visible`, `editable = visible && !readonly`;
/// a hidden field can never be editable, whatever `readonly` says.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldAccess {
    #[serde(default)]
    pub visible: Option<bool>,
    #[serde(default)]
    pub readonly: Option<bool>,
}

impl FieldAccess {
    /// Resolved `(readable, editable)` pair.
    #[must_use]
    pub fn resolve(&self) -> (bool, bool) {
        let visible = self.visible.unwrap_or(true);
        let readonly = self.readonly.unwrap_or(false);
        (visible, visible && !readonly)
    }

    /// The resolved permission record for `field`.
    #[must_use]
    pub fn permission_for(&self, field: impl Into<String>) -> FieldPermission {
        let (readable, editable) = self.resolve();
        FieldPermission {
            field: field.into(),
            readable,
            editable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_visible_and_writable() {
        assert_eq!(FieldAccess::default().resolve(), (true, true));
    }

    #[test]
    fn readonly_field_stays_readable() {
        let access = FieldAccess {
            visible: None,
            readonly: Some(true),
        };
        assert_eq!(access.resolve(), (true, false));
    }

    #[test]
    fn hidden_field_is_never_editable() {
        let access = FieldAccess {
            visible: Some(false),
            readonly: Some(false),
        };
        assert_eq!(access.resolve(), (false, false));

        let explicit_writable = FieldAccess {
            visible: Some(false),
            readonly: None,
        };
        assert_eq!(explicit_writable.resolve(), (false, false));
    }

    #[test]
    fn editable_always_implies_readable() {
        let combos = [
            (None, None),
            (Some(true), Some(true)),
            (Some(true), Some(false)),
            (Some(false), Some(true)),
            (Some(false), Some(false)),
        ];
        for (visible, readonly) in combos {
            let (readable, editable) = FieldAccess { visible, readonly }.resolve();
            assert!(!editable || readable, "visible={visible:?} readonly={readonly:?}");
        }
    }

    #[test]
    fn permission_record_carries_field_name() {
        let perm = FieldAccess::default().permission_for("Account.Industry");
        assert_eq!(perm.field, "Account.Industry");
        assert!(perm.readable && perm.editable);
    }
}
