//! Tracking-service domain types.
//!
//! `Project` and `Issue` mirror what the tracker returns. `ProjectState` and
//! `Progress` encode the invariants on values we send: states come from a
//! fixed set and progress is a percentage in `[0, 100]`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::ids::{IssueId, ProjectId};

/// Project lifecycle state accepted by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectState {
    Backlog,
    Planned,
    InProgress,
    Paused,
    Completed,
    Canceled,
}

impl ProjectState {
    /// Returns the tracker API string for this state.
    pub fn as_api_str(&self) -> &'static str {
        match self {
            ProjectState::Backlog => "backlog",
            ProjectState::Planned => "planned",
            ProjectState::InProgress => "in_progress",
            ProjectState::Paused => "paused",
            ProjectState::Completed => "completed",
            ProjectState::Canceled => "canceled",
        }
    }
}

impl fmt::Display for ProjectState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_str())
    }
}

/// Error for a progress value outside `[0, 100]` (or not a number).
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("progress must be between 0 and 100, got {0}")]
pub struct InvalidProgress(pub f64);

/// A completion percentage in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Progress(f64);

impl Progress {
    pub const HALFWAY: Progress = Progress(50.0);
    pub const COMPLETE: Progress = Progress(100.0);

    pub fn new(value: f64) -> Result<Self, InvalidProgress> {
        if value.is_finite() && (0.0..=100.0).contains(&value) {
            Ok(Progress(value))
        } else {
            Err(InvalidProgress(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Progress {
    type Error = InvalidProgress;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Progress::new(value)
    }
}

impl From<Progress> for f64 {
    fn from(progress: Progress) -> Self {
        progress.0
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// A project as reported by the tracker.
///
/// `state` is kept as the tracker's own string: we accept whatever the remote
/// reports on reads and only constrain the values we write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: Option<String>,
    pub state: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub target_date: Option<String>,
    pub progress: Option<Progress>,
}

/// An issue as reported by the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: IssueId,
    pub title: String,
    pub description: Option<String>,
    pub state: String,
    pub project_id: Option<ProjectId>,
    pub assignee_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A requested change to a project's state.
///
/// Also the body of `PATCH /api/linear/projects/{id}`, so unknown states and
/// out-of-range progress are rejected during deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectUpdate {
    pub state: ProjectState,
    #[serde(default)]
    pub progress: Option<Progress>,
    #[serde(default)]
    pub description: Option<String>,
}
