//! # Batch Submitter
//!
//! Splits staged items into fixed-size groups, dispatches every group's
//! remote call concurrently, and joins them all before reporting.
//!
//! One group's failure never cancels or blocks the others, and there is no
//! retry: a failed group is reported, not resubmitted. Partial failure is
//! an outcome, not an error: the returned report carries every group's
//! result and every failing item, and the union of all per-item results is
//! assigned back into the report rather than discarded.

use std::future::Future;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::Error;
use crate::model::{ProfileUpdateDocument, SubmitResult};
use crate::provider::MetadataWriter;

/// Default number of items per submission group.
pub const DEFAULT_CHUNK_SIZE: usize = 10;

/// Outcome of one submission group.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupOutcome {
    /// Zero-based position of the group in dispatch order.
    pub index: usize,
    /// Number of items in the group.
    pub size: usize,
    /// True when every item in the group succeeded.
    pub success: bool,
    /// Transport-level error, when the whole remote call failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One failing item, surfaced individually.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFailure {
    pub name: String,
    pub errors: Vec<String>,
}

/// Aggregated outcome of a batched submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReport {
    /// Total items staged for submission.
    pub total_items: usize,
    /// Total groups dispatched.
    pub total_groups: usize,
    /// Per-group outcomes, in dispatch order.
    pub groups: Vec<GroupOutcome>,
    /// Union of every group's per-item results.
    pub results: Vec<SubmitResult>,
    /// Every failing item across all groups.
    pub failures: Vec<ItemFailure>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SubmitReport {
    /// Number of groups in which every item succeeded.
    #[must_use]
    pub fn successful_groups(&self) -> usize {
        self.groups.iter().filter(|g| g.success).count()
    }

    /// Number of groups with at least one failing item or a transport
    /// failure.
    #[must_use]
    pub fn failed_groups(&self) -> usize {
        self.total_groups - self.successful_groups()
    }

    /// True when every group succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && self.groups.iter().all(|g| g.success)
    }

    /// True when some groups succeeded and at least one failed.
    #[must_use]
    pub fn is_partial_failure(&self) -> bool {
        !self.is_success() && self.successful_groups() > 0
    }
}

/// Submit profile update documents in groups of at most `chunk_size`.
///
/// Fails fast with a validation error when `chunk_size` is zero; remote
/// failures never fail the call.
pub async fn submit_documents(
    writer: &dyn MetadataWriter,
    documents: &[ProfileUpdateDocument],
    chunk_size: usize,
) -> Result<SubmitReport, Error> {
    run_groups(
        documents,
        chunk_size,
        |doc| doc.canonical_name.clone(),
        |group| writer.update_profiles(group),
    )
    .await
}

/// Generic grouped dispatch shared by document submission and
/// permission-set assignment.
pub(crate) async fn run_groups<'a, T, N, F, Fut>(
    items: &'a [T],
    chunk_size: usize,
    item_name: N,
    submit_group: F,
) -> Result<SubmitReport, Error>
where
    N: Fn(&T) -> String,
    F: Fn(&'a [T]) -> Fut,
    Fut: Future<Output = anyhow::Result<Vec<SubmitResult>>>,
{
    if chunk_size == 0 {
        return Err(Error::validation("chunk size must be at least 1"));
    }

    let started_at = Utc::now();
    let chunks: Vec<&'a [T]> = items.chunks(chunk_size).collect();
    info!(
        "submitting {} items in {} groups of at most {}",
        items.len(),
        chunks.len(),
        chunk_size
    );

    // Every group's call is created up front and joined as a whole; a
    // failing group must not cancel the others.
    let outcomes = join_all(chunks.iter().copied().map(|chunk| submit_group(chunk))).await;

    let mut report = SubmitReport {
        total_items: items.len(),
        total_groups: chunks.len(),
        groups: Vec::with_capacity(chunks.len()),
        results: Vec::with_capacity(items.len()),
        failures: Vec::new(),
        started_at,
        finished_at: started_at,
    };

    for (index, (chunk, outcome)) in chunks.iter().zip(outcomes).enumerate() {
        match outcome {
            Ok(results) => {
                let success = results.iter().all(|r| r.success);
                for result in &results {
                    if !result.success {
                        warn!(
                            "group {}: item '{}' failed: {}",
                            index + 1,
                            result.name,
                            result.errors.join("; ")
                        );
                        report.failures.push(ItemFailure {
                            name: result.name.clone(),
                            errors: result.errors.clone(),
                        });
                    }
                }
                if success {
                    debug!("group {} processed successfully", index + 1);
                }
                report.results.extend(results);
                report.groups.push(GroupOutcome {
                    index,
                    size: chunk.len(),
                    success,
                    error: None,
                });
            }
            Err(e) => {
                let message = format!("{e:#}");
                warn!("group {} failed: {}", index + 1, message);
                for item in *chunk {
                    report.failures.push(ItemFailure {
                        name: item_name(item),
                        errors: vec![message.clone()],
                    });
                }
                report.groups.push(GroupOutcome {
                    index,
                    size: chunk.len(),
                    success: false,
                    error: Some(message),
                });
            }
        }
    }

    report.finished_at = Utc::now();
    Ok(report)
}
