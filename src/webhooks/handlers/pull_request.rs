//! Handler for `pull_request` webhook events.
//!
//! The tracking issue is looked up in the PR title first, then its body.

use crate::effects::{UpdateIntent, WorkUnit};
use crate::references::extract_first;
use crate::types::{ProjectId, ProjectState};
use crate::webhooks::events::{PrAction, PullRequestEvent};

use super::HandlerResult;

/// Handles a pull request event.
///
/// # Event Actions
///
/// | Action | Desired state |
/// |--------|---------------|
/// | `opened` | `in_progress` |
/// | `closed` (merged) | `completed` |
/// | `closed` (not merged) | `canceled` |
/// | `reopened` | `in_progress` |
///
/// Other actions are acknowledged without an update. At most one unit is
/// produced.
pub fn handle_pull_request(
    event: &PullRequestEvent,
    default_project: Option<&ProjectId>,
) -> HandlerResult {
    let texts = [event.title.as_str(), event.body.as_deref().unwrap_or("")];
    let Some(issue_ref) = extract_first(texts) else {
        return HandlerResult::message_only("No tracking issue reference found in PR");
    };

    let state = match &event.action {
        PrAction::Opened | PrAction::Reopened => ProjectState::InProgress,
        PrAction::Closed if event.is_merged() => ProjectState::Completed,
        PrAction::Closed => ProjectState::Canceled,
        PrAction::Other(action) => {
            return HandlerResult::message_only(format!(
                "Pull request action {action} not handled"
            ));
        }
    };

    let description = format!(
        "PR Description:\n{}\n\nPR URL: {}",
        event.body.as_deref().unwrap_or("No description"),
        event.url
    );
    let intent = UpdateIntent::issue(event.title.clone(), description)
        .with_target(default_project.cloned())
        .with_state(state, None);

    HandlerResult::new(
        "Pull request event processed",
        vec![WorkUnit::Update {
            subject: event.url.clone(),
            issue_ref,
            intent,
        }],
    )
}
