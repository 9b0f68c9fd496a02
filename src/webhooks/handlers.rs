//! Event handlers for GitHub webhook events.
//!
//! Handlers are pure functions following the effects-as-data pattern:
//! - Input: a parsed webhook event + the configured default project
//! - Output: an acknowledgment message + work units for the dispatcher
//!
//! No handler performs I/O; tracker calls happen in
//! [`crate::effects::dispatch_units`].
//!
//! # Event Types
//!
//! | Event | Handler |
//! |-------|---------|
//! | `push` | `handle_push` - one unit per commit |
//! | `pull_request` | `handle_pull_request` - opened, closed, reopened |
//! | `workflow_run` | `handle_workflow_run` - run status to project state |

mod pull_request;
mod push;
mod workflow_run;

use crate::effects::WorkUnit;
use crate::types::ProjectId;
use crate::webhooks::GitHubEvent;

pub use pull_request::handle_pull_request;
pub use push::handle_push;
pub use workflow_run::handle_workflow_run;

/// Result of handling an event.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerResult {
    /// Human-readable acknowledgment returned to GitHub.
    pub message: String,

    /// Work for the dispatcher, in subject order.
    pub units: Vec<WorkUnit>,
}

impl HandlerResult {
    pub fn new(message: impl Into<String>, units: Vec<WorkUnit>) -> Self {
        HandlerResult {
            message: message.into(),
            units,
        }
    }

    /// Creates a result with a message and nothing to dispatch.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self::new(message, Vec::new())
    }

    /// Acknowledgment for an event type the bot does not handle.
    pub fn not_handled(event_type: &str) -> Self {
        Self::message_only(format!("Event type {event_type} not handled"))
    }

    /// Returns true if there is nothing to dispatch.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Handles a GitHub webhook event.
///
/// Dispatches to the handler for the event's kind. `default_project` is
/// attached to every intent as its target project.
pub fn handle_event(event: &GitHubEvent, default_project: Option<&ProjectId>) -> HandlerResult {
    match event {
        GitHubEvent::Push(e) => handle_push(e, default_project),
        GitHubEvent::PullRequest(e) => handle_pull_request(e, default_project),
        GitHubEvent::WorkflowRun(e) => handle_workflow_run(e, default_project),
    }
}
