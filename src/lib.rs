//! Launch Readiness Bot - propagates GitHub activity into Linear.
//!
//! Push, pull request and workflow run webhooks are authenticated, searched
//! for tracking-issue references (`ABC-123`), and turned into issue and
//! project updates in the tracker.

pub mod config;
pub mod effects;
pub mod references;
pub mod server;
pub mod tracker;
pub mod types;
pub mod webhooks;
pub mod workflow;

#[cfg(test)]
pub mod test_utils;
