//! Deterministic `(status, conclusion)` to `(state, progress)` mapping.

use std::fmt;

use crate::types::{Progress, ProjectState};

/// Status of a workflow run, as reported by GitHub.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RunStatus {
    Queued,
    InProgress,
    Completed,
    /// Any other status (`requested`, `waiting`, `pending`, ...).
    Other(String),
}

impl RunStatus {
    pub fn from_api_str(s: &str) -> Self {
        match s {
            "queued" => RunStatus::Queued,
            "in_progress" => RunStatus::InProgress,
            "completed" => RunStatus::Completed,
            other => RunStatus::Other(other.to_string()),
        }
    }

    pub fn as_api_str(&self) -> &str {
        match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::Completed => "completed",
            RunStatus::Other(s) => s,
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_str())
    }
}

/// Conclusion of a completed workflow run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RunConclusion {
    Success,
    Failure,
    Cancelled,
    /// Any other conclusion (`neutral`, `skipped`, `timed_out`, ...).
    Other(String),
}

impl RunConclusion {
    pub fn from_api_str(s: &str) -> Self {
        match s {
            "success" => RunConclusion::Success,
            "failure" => RunConclusion::Failure,
            "cancelled" => RunConclusion::Cancelled,
            other => RunConclusion::Other(other.to_string()),
        }
    }

    pub fn as_api_str(&self) -> &str {
        match self {
            RunConclusion::Success => "success",
            RunConclusion::Failure => "failure",
            RunConclusion::Cancelled => "cancelled",
            RunConclusion::Other(s) => s,
        }
    }
}

/// State derived from a workflow run.
///
/// This is a superset of [`ProjectState`]: a failed run maps to `Blocked`,
/// which the tracker does not accept. Use [`WorkflowState::project_state`]
/// before dispatching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowState {
    Backlog,
    InProgress,
    Blocked,
    Paused,
    Completed,
}

impl WorkflowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowState::Backlog => "backlog",
            WorkflowState::InProgress => "in_progress",
            WorkflowState::Blocked => "blocked",
            WorkflowState::Paused => "paused",
            WorkflowState::Completed => "completed",
        }
    }

    /// Reconciles to a state the tracker accepts.
    ///
    /// `Blocked` becomes `Paused`: work stopped and needs attention before it
    /// can resume.
    pub fn project_state(&self) -> ProjectState {
        match self {
            WorkflowState::Backlog => ProjectState::Backlog,
            WorkflowState::InProgress => ProjectState::InProgress,
            WorkflowState::Blocked | WorkflowState::Paused => ProjectState::Paused,
            WorkflowState::Completed => ProjectState::Completed,
        }
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a workflow run's status and conclusion to a state and progress.
///
/// | status | conclusion | state | progress |
/// |--------|------------|-------|----------|
/// | completed | success | completed | 100 |
/// | completed | failure | blocked | - |
/// | completed | cancelled | paused | - |
/// | completed | other / none | in_progress | - |
/// | in_progress | (ignored) | in_progress | 50 |
/// | anything else | (ignored) | backlog | - |
///
/// Total over its inputs: unknown statuses fall through to `backlog`.
///
/// # Examples
///
/// ```
/// use launch_readiness::types::Progress;
/// use launch_readiness::workflow::{RunConclusion, RunStatus, WorkflowState, map_workflow_status};
///
/// let (state, progress) =
///     map_workflow_status(&RunStatus::Completed, Some(&RunConclusion::Success));
/// assert_eq!(state, WorkflowState::Completed);
/// assert_eq!(progress, Some(Progress::COMPLETE));
///
/// let (state, progress) = map_workflow_status(&RunStatus::from_api_str("pending"), None);
/// assert_eq!(state, WorkflowState::Backlog);
/// assert_eq!(progress, None);
/// ```
pub fn map_workflow_status(
    status: &RunStatus,
    conclusion: Option<&RunConclusion>,
) -> (WorkflowState, Option<Progress>) {
    match status {
        RunStatus::Completed => match conclusion {
            Some(RunConclusion::Success) => (WorkflowState::Completed, Some(Progress::COMPLETE)),
            Some(RunConclusion::Failure) => (WorkflowState::Blocked, None),
            Some(RunConclusion::Cancelled) => (WorkflowState::Paused, None),
            Some(RunConclusion::Other(_)) | None => (WorkflowState::InProgress, None),
        },
        RunStatus::InProgress => (WorkflowState::InProgress, Some(Progress::HALFWAY)),
        RunStatus::Queued | RunStatus::Other(_) => (WorkflowState::Backlog, None),
    }
}
