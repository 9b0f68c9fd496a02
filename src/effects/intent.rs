//! Update intents and work units.
//!
//! Handlers describe tracker mutations as values. Nothing here performs I/O;
//! the dispatcher turns each [`WorkUnit`] into an [`super::UpdateOutcome`].

use serde::Serialize;

use crate::types::{IssueRef, Progress, ProjectId, ProjectState};

/// A desired tracker mutation derived from one webhook subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateIntent {
    /// Title of the issue to create or update.
    pub title: String,

    /// Issue description. Always carries a link back to the GitHub subject.
    pub description: String,

    /// Project the issue belongs to, and whose state is updated when
    /// `desired_state` is set.
    pub target: Option<ProjectId>,

    pub desired_state: Option<ProjectState>,

    /// Only meaningful together with `desired_state`.
    pub desired_progress: Option<Progress>,
}

impl UpdateIntent {
    /// Creates an intent that only touches the issue.
    pub fn issue(title: impl Into<String>, description: impl Into<String>) -> Self {
        UpdateIntent {
            title: title.into(),
            description: description.into(),
            target: None,
            desired_state: None,
            desired_progress: None,
        }
    }

    pub fn with_target(mut self, target: Option<ProjectId>) -> Self {
        self.target = target;
        self
    }

    pub fn with_state(mut self, state: ProjectState, progress: Option<Progress>) -> Self {
        self.desired_state = Some(state);
        self.desired_progress = progress;
        self
    }

    /// Returns true if the dispatcher should follow the issue write with a
    /// project state update.
    pub fn updates_project(&self) -> bool {
        self.target.is_some() && self.desired_state.is_some()
    }
}

/// One handler output.
///
/// `subject` identifies what the unit is about (commit id, PR URL, run URL)
/// so outcomes can be correlated with their source.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkUnit {
    /// Apply an intent on behalf of a referenced issue.
    Update {
        subject: String,
        issue_ref: IssueRef,
        intent: UpdateIntent,
    },

    /// Nothing to do for this subject, with the reason why.
    Skip { subject: String, reason: String },
}

impl WorkUnit {
    pub fn subject(&self) -> &str {
        match self {
            WorkUnit::Update { subject, .. } | WorkUnit::Skip { subject, .. } => subject,
        }
    }

    pub fn intent(&self) -> Option<&UpdateIntent> {
        match self {
            WorkUnit::Update { intent, .. } => Some(intent),
            WorkUnit::Skip { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_intent_has_no_project_side_effects() {
        let intent = UpdateIntent::issue("Commit: fix", "body");
        assert_eq!(intent.title, "Commit: fix");
        assert!(intent.target.is_none());
        assert!(!intent.updates_project());
    }

    #[test]
    fn project_update_needs_target_and_state() {
        let targeted = UpdateIntent::issue("t", "d").with_target(Some(ProjectId::from("proj-1")));
        assert!(!targeted.updates_project());

        let stateful = targeted.with_state(ProjectState::Completed, Some(Progress::COMPLETE));
        assert!(stateful.updates_project());
        assert_eq!(stateful.desired_progress, Some(Progress::COMPLETE));

        let untargeted = UpdateIntent::issue("t", "d").with_state(ProjectState::Paused, None);
        assert!(!untargeted.updates_project());
    }

    #[test]
    fn work_unit_accessors() {
        let skip = WorkUnit::Skip {
            subject: "abc123".to_string(),
            reason: "no reference".to_string(),
        };
        assert_eq!(skip.subject(), "abc123");
        assert!(skip.intent().is_none());
    }
}
