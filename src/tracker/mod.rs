//! Project tracker access.
//!
//! This module provides the [`TrackerGateway`] trait and its implementations:
//! - [`LinearClient`] talks to Linear's GraphQL API
//! - [`DryRunGateway`] logs what would have happened
//!
//! Failures are reported as [`TrackerError`] and never retried.

mod client;
mod dry_run;
mod error;
mod gateway;
mod linear;

pub use client::{DEFAULT_API_URL, LinearClient};
pub use dry_run::{DRY_RUN_ID_PREFIX, DryRunGateway};
pub use error::TrackerError;
pub use gateway::TrackerGateway;
