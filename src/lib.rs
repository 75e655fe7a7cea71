//! # Permission Reconciler
//!
//! Reconciliation engine for profile permission metadata: turns
//! caller-supplied access flags and a directory catalog snapshot into
//! normalized per-profile update documents, and submits them in
//! concurrent fixed-size groups.
//!
//! ## Flow
//!
//! 1. [`matcher`] selects target profiles and entities by glob pattern
//! 2. [`rules`] resolves the requested access into consistent permission
//!    records
//! 3. [`reconcile`] merges the records into each profile's existing
//!    collection
//! 4. [`submit`] dispatches the staged documents in groups and reports
//!    per-group and per-item outcomes
//!
//! [`sync::SyncEngine`] binds the pipeline to the collaborator traits in
//! [`provider`]; [`assignment::AssignmentEngine`] does the same for
//! permission-set assignment. The directory service itself (authentication,
//! transport, retries) stays behind those traits.

pub mod assignment;
pub mod error;
pub mod matcher;
pub mod model;
pub mod provider;
pub mod reconcile;
pub mod report;
pub mod rules;
pub mod submit;
pub mod sync;

pub use assignment::AssignmentEngine;
pub use error::Error;
pub use matcher::PatternSet;
pub use model::{
    FieldPermission, ObjectPermission, PermissionKind, Profile, ProfileHandle,
    ProfileUpdateDocument, RecordTypeVisibility, SubmitResult,
};
pub use reconcile::ZeroEntityPolicy;
pub use report::AccessSummary;
pub use rules::{FieldAccess, ObjectAccess, RecordTypeUpdate};
pub use submit::{SubmitReport, DEFAULT_CHUNK_SIZE};
pub use sync::SyncEngine;
