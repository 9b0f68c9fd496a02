//! Handler for `workflow_run` webhook events.
//!
//! The tracking issue is taken from the run's head branch name
//! (e.g. `feature/ABC-123-login`).

use crate::effects::{UpdateIntent, WorkUnit};
use crate::references::extract_issue_ref;
use crate::types::ProjectId;
use crate::webhooks::events::WorkflowRunEvent;
use crate::workflow::map_workflow_status;

use super::HandlerResult;

/// Handles a workflow run event.
///
/// The run's status and conclusion are mapped with
/// [`map_workflow_status`]; the resulting state is reconciled to a tracker
/// state before it is placed on the intent.
pub fn handle_workflow_run(
    event: &WorkflowRunEvent,
    default_project: Option<&ProjectId>,
) -> HandlerResult {
    let Some(issue_ref) = event.head_branch.as_deref().and_then(extract_issue_ref) else {
        return HandlerResult::message_only("No tracking issue reference found in workflow");
    };

    let (state, progress) = map_workflow_status(&event.status, event.conclusion.as_ref());

    let intent = UpdateIntent::issue(
        format!("Workflow: {}", event.name),
        format!("Workflow Status: {state}\nWorkflow URL: {}", event.url),
    )
    .with_target(default_project.cloned())
    .with_state(state.project_state(), progress);

    HandlerResult::new(
        "Workflow run event processed",
        vec![WorkUnit::Update {
            subject: event.url.clone(),
            issue_ref,
            intent,
        }],
    )
}
