//! Executes work units against a tracker gateway.
//!
//! Units in one batch run concurrently. Outcomes come back in input order, so
//! the `n`th outcome always belongs to the `n`th unit. A failing unit yields an
//! `error` outcome and does not affect its siblings. Nothing is retried.

use futures::future::join_all;
use tracing::{info, warn};

use crate::tracker::{TrackerError, TrackerGateway};
use crate::types::{Issue, IssueRef, ProjectUpdate};

use super::{UpdateIntent, UpdateOutcome, WorkUnit};

/// Dispatches every unit and returns one outcome per unit, in order.
pub async fn dispatch_units(
    gateway: &dyn TrackerGateway,
    units: Vec<WorkUnit>,
) -> Vec<UpdateOutcome> {
    join_all(units.into_iter().map(|unit| dispatch_unit(gateway, unit))).await
}

async fn dispatch_unit(gateway: &dyn TrackerGateway, unit: WorkUnit) -> UpdateOutcome {
    match unit {
        WorkUnit::Skip { subject, reason } => UpdateOutcome::NoUpdate { subject, reason },
        WorkUnit::Update {
            subject,
            issue_ref,
            intent,
        } => match apply_intent(gateway, &intent).await {
            Ok(issue) => {
                info!(
                    subject = %subject,
                    issue_ref = %issue_ref,
                    issue_id = %issue.id,
                    "Tracker updated"
                );
                // Only report a project state that was actually written.
                let (state, progress) = if intent.updates_project() {
                    (intent.desired_state, intent.desired_progress)
                } else {
                    (None, None)
                };
                UpdateOutcome::Success {
                    subject,
                    issue_ref,
                    issue_id: issue.id,
                    state,
                    progress,
                }
            }
            Err(e) => failed(subject, issue_ref, &e),
        },
    }
}

/// Writes the issue, then the project state if the intent asks for one.
async fn apply_intent(
    gateway: &dyn TrackerGateway,
    intent: &UpdateIntent,
) -> Result<Issue, TrackerError> {
    let issue = gateway
        .create_or_update_issue(&intent.title, &intent.description, intent.target.as_ref())
        .await?;

    if let (Some(project), Some(state)) = (&intent.target, intent.desired_state) {
        let update = ProjectUpdate {
            state,
            progress: intent.desired_progress,
            description: None,
        };
        gateway.update_project(project, &update).await?;
    }

    Ok(issue)
}

fn failed(subject: String, issue_ref: IssueRef, error: &TrackerError) -> UpdateOutcome {
    warn!(
        subject = %subject,
        issue_ref = %issue_ref,
        status = ?error.status_code(),
        error = %error,
        "Tracker update failed"
    );
    UpdateOutcome::Error {
        subject,
        issue_ref,
        error: error.to_string(),
    }
}
