//! # Permission-Set Assignment
//!
//! Assigns a named permission set to users that do not yet hold it: the
//! label is resolved against the store (a hard failure when it matches
//! nothing), already-assigned users are filtered remotely, and the staged
//! assignments go out through the grouped submitter.

use std::sync::Arc;

use tracing::info;

use crate::error::Error;
use crate::model::PermissionSetAssignment;
use crate::provider::AssignmentStore;
use crate::submit::{run_groups, SubmitReport};
use crate::sync::{validate_assignment_request, AssignmentRequest};

/// Binds assignment staging to an assignment store.
#[derive(Clone)]
pub struct AssignmentEngine {
    store: Arc<dyn AssignmentStore>,
}

impl std::fmt::Debug for AssignmentEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssignmentEngine").finish_non_exhaustive()
    }
}

impl AssignmentEngine {
    pub fn new(store: Arc<dyn AssignmentStore>) -> Self {
        Self { store }
    }

    /// Stage assignments for users that do not yet hold the permission
    /// set, without submitting them.
    pub async fn plan(
        &self,
        request: &AssignmentRequest,
    ) -> Result<Vec<PermissionSetAssignment>, Error> {
        validate_assignment_request(request)?;

        let permission_set = self
            .store
            .find_permission_set(&request.permission_set)
            .await?
            .ok_or_else(|| {
                Error::not_found("permission set", request.permission_set.clone())
            })?;

        let usernames: Vec<String> = request
            .usernames
            .iter()
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .collect();
        let users = self
            .store
            .unassigned_users(&permission_set.id, &usernames)
            .await?;
        if users.is_empty() {
            return Err(Error::not_found("assignable users", usernames.join(",")));
        }

        info!(
            "staging {} assignments for permission set '{}'",
            users.len(),
            permission_set.label
        );
        Ok(users
            .into_iter()
            .map(|user| PermissionSetAssignment {
                permission_set_id: permission_set.id.clone(),
                assignee_id: user.id,
                assignee_username: user.username,
            })
            .collect())
    }

    /// Stage and submit assignments in groups.
    pub async fn assign(&self, request: &AssignmentRequest) -> Result<SubmitReport, Error> {
        let assignments = self.plan(request).await?;
        run_groups(
            &assignments,
            request.chunk_size,
            |a| a.assignee_username.clone(),
            |group| self.store.create_assignments(group),
        )
        .await
    }
}
