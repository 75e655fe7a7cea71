//! # Permission Rule Engine
//!
//! Turns caller-supplied access flags into fully consistent permission
//! records.
//!
//! Each permission kind has an explicit request structure with optional
//! fields and a documented default-resolution order. Resolution is pure:
//! the caller's input is never mutated, and the same request always
//! resolves to the same record.

mod field;
mod object;
mod record_type;

pub use field::FieldAccess;
pub use object::{normalize_object_permission, ObjectAccess};
pub use record_type::{merge_record_type_visibilities, RecordTypeUpdate};
