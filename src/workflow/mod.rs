//! Workflow run status mapping.
//!
//! GitHub reports a workflow run as a `(status, conclusion)` pair. This module
//! turns that pair into the project state and progress we push to the tracker.

mod mapping;

pub use mapping::{RunConclusion, RunStatus, WorkflowState, map_workflow_status};
