//! Tracking-issue reference extraction.
//!
//! References like `ABC-123` appear in commit messages, PR titles and bodies,
//! and branch names. They correlate GitHub activity with tracker issues.

mod extract;

pub use extract::{extract_first, extract_issue_ref};
