//! Core domain types.
//!
//! Identifiers and tracker values shared by the webhook pipeline, the
//! tracker gateway and the HTTP API.

pub mod ids;
pub mod tracker;

pub use ids::{IssueId, IssueRef, ProjectId};
pub use tracker::{InvalidProgress, Issue, Progress, Project, ProjectState, ProjectUpdate};
