//! Per-unit results reported back to the webhook caller.

use serde::Serialize;

use crate::types::{IssueId, IssueRef, Progress, ProjectState};

/// Result of dispatching one [`super::WorkUnit`].
///
/// Serialized with a `status` tag so callers can tell successes, failures
/// and skips apart in the `updates` array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UpdateOutcome {
    Success {
        subject: String,
        issue_ref: IssueRef,
        /// Tracker id of the created or updated issue.
        issue_id: IssueId,
        #[serde(skip_serializing_if = "Option::is_none")]
        state: Option<ProjectState>,
        #[serde(skip_serializing_if = "Option::is_none")]
        progress: Option<Progress>,
    },

    Error {
        subject: String,
        issue_ref: IssueRef,
        error: String,
    },

    NoUpdate { subject: String, reason: String },
}

impl UpdateOutcome {
    pub fn subject(&self) -> &str {
        match self {
            UpdateOutcome::Success { subject, .. }
            | UpdateOutcome::Error { subject, .. }
            | UpdateOutcome::NoUpdate { subject, .. } => subject,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UpdateOutcome::Success { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, UpdateOutcome::Error { .. })
    }
}
