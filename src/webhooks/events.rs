//! GitHub webhook event types.
//!
//! Typed representations of the webhook events the bot acts on, holding only
//! the fields the handlers need.
//!
//! # Event Types
//!
//! - `push` - commits pushed to a branch
//! - `pull_request` - PR lifecycle (opened, closed, reopened, ...)
//! - `workflow_run` - GitHub Actions run status changes

use chrono::{DateTime, Utc};

use crate::workflow::{RunConclusion, RunStatus};

/// Event kind, as declared by the `X-GitHub-Event` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Push,
    PullRequest,
    WorkflowRun,
    /// Any event type the bot does not handle.
    Unknown,
}

impl EventKind {
    pub fn from_header(event_type: &str) -> Self {
        match event_type {
            "push" => EventKind::Push,
            "pull_request" => EventKind::PullRequest,
            "workflow_run" => EventKind::WorkflowRun,
            _ => EventKind::Unknown,
        }
    }
}

/// A parsed GitHub webhook event.
///
/// Unknown event types never reach this enum; the parser returns `None` for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitHubEvent {
    Push(PushEvent),
    PullRequest(PullRequestEvent),
    WorkflowRun(WorkflowRunEvent),
}

impl GitHubEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GitHubEvent::Push(_) => EventKind::Push,
            GitHubEvent::PullRequest(_) => EventKind::PullRequest,
            GitHubEvent::WorkflowRun(_) => EventKind::WorkflowRun,
        }
    }
}

/// A push of one or more commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushEvent {
    /// The full ref that was pushed (e.g. `refs/heads/main`).
    pub git_ref: String,

    /// SHA of the ref before the push.
    pub before_sha: String,

    /// SHA of the ref after the push.
    pub after_sha: String,

    /// Pushed commits, oldest first, as GitHub orders them.
    pub commits: Vec<PushCommit>,
}

/// A single commit in a push event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushCommit {
    pub id: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,

    /// GitHub login of the author, when the author is linked to an account.
    pub author_login: Option<String>,

    /// Web URL of the commit.
    pub url: String,
}

impl PushCommit {
    /// Returns the first line of the commit message (the subject).
    pub fn subject_line(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

/// Action performed on a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PrAction {
    Opened,
    /// PR was closed (merged or not; see `merged_at`).
    Closed,
    Reopened,
    /// Any other action (edited, labeled, synchronize, ...).
    Other(String),
}

impl PrAction {
    pub fn from_api_str(s: &str) -> Self {
        match s {
            "opened" => PrAction::Opened,
            "closed" => PrAction::Closed,
            "reopened" => PrAction::Reopened,
            other => PrAction::Other(other.to_string()),
        }
    }

    pub fn as_api_str(&self) -> &str {
        match self {
            PrAction::Opened => "opened",
            PrAction::Closed => "closed",
            PrAction::Reopened => "reopened",
            PrAction::Other(s) => s,
        }
    }
}

/// A pull request event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestEvent {
    pub action: PrAction,
    pub title: String,
    pub body: Option<String>,

    /// When the PR was merged. Only set for merged PRs.
    pub merged_at: Option<DateTime<Utc>>,

    /// Web URL of the PR.
    pub url: String,
}

impl PullRequestEvent {
    pub fn is_merged(&self) -> bool {
        self.merged_at.is_some()
    }
}

/// A workflow run event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowRunEvent {
    /// Workflow name (e.g. "CI").
    pub name: String,
    pub status: RunStatus,

    /// Only set once the run has completed.
    pub conclusion: Option<RunConclusion>,

    /// Branch the run was triggered on. GitHub omits it for some triggers.
    pub head_branch: Option<String>,

    /// Web URL of the run.
    pub url: String,
}
