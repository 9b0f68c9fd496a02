//! Handler for `push` webhook events.
//!
//! Each commit is considered on its own: a commit whose message references a
//! tracking issue becomes an update intent, any other commit becomes an
//! explicit skip. The result always has exactly one unit per commit.

use crate::effects::{UpdateIntent, WorkUnit};
use crate::references::extract_issue_ref;
use crate::types::ProjectId;
use crate::webhooks::events::{PushCommit, PushEvent};

use super::HandlerResult;

/// Handles a push event.
pub fn handle_push(event: &PushEvent, default_project: Option<&ProjectId>) -> HandlerResult {
    let units = event
        .commits
        .iter()
        .map(|commit| commit_unit(commit, default_project))
        .collect();

    HandlerResult::new("Push event processed", units)
}

fn commit_unit(commit: &PushCommit, default_project: Option<&ProjectId>) -> WorkUnit {
    let Some(issue_ref) = extract_issue_ref(&commit.message) else {
        return WorkUnit::Skip {
            subject: commit.id.clone(),
            reason: "No tracking issue reference in commit message".to_string(),
        };
    };

    let intent = UpdateIntent::issue(
        format!("Commit: {}", commit.subject_line()),
        format!(
            "Commit Message:\n{}\n\nCommit URL: {}",
            commit.message, commit.url
        ),
    )
    .with_target(default_project.cloned());

    WorkUnit::Update {
        subject: commit.id.clone(),
        issue_ref,
        intent,
    }
}
