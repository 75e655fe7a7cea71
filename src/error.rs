//! # Error Types
//!
//! Error taxonomy for the reconciliation engine.
//!
//! Validation and lookup failures are detected before any remote call and
//! carry the offending flag, pattern, or entity name. Collaborator failures
//! outside submission are wrapped with their full context chain. Partial
//! submission failure is deliberately *not* an error: the run completes and
//! the [`SubmitReport`](crate::submit::SubmitReport) carries every failing
//! group and item.

use thiserror::Error;

/// Errors surfaced by the reconciliation engine.
#[derive(Debug, Error)]
pub enum Error {
    /// The caller-supplied request is invalid or incomplete.
    ///
    /// Detected before any remote call; never retried.
    #[error("invalid request: {0}")]
    Validation(String),

    /// A required lookup matched nothing.
    #[error("no {kind} matched '{pattern}'")]
    NotFound {
        /// What was being looked up (profiles, fields, a permission set).
        kind: &'static str,
        /// The pattern or name that matched nothing.
        pattern: String,
    },

    /// A collaborator call failed outside submission.
    #[error("remote call failed: {0}")]
    Remote(#[from] anyhow::Error),
}

impl Error {
    /// Shorthand for a validation failure with a formatted message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Shorthand for a failed lookup.
    pub fn not_found(kind: &'static str, pattern: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            pattern: pattern.into(),
        }
    }
}
