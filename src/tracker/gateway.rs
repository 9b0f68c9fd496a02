//! The tracking-service gateway trait.
//!
//! Handlers never see this trait; they return [`crate::effects::WorkUnit`]s
//! and the dispatcher executes them through a gateway. Implementations:
//!
//! - [`super::LinearClient`]: Linear's GraphQL API
//! - [`super::DryRunGateway`]: logs calls, touches nothing
//!
//! The trait is object-safe (via `async_trait`) so the server can hold an
//! `Arc<dyn TrackerGateway>` chosen at startup.

use async_trait::async_trait;

use crate::types::{Issue, Project, ProjectId, ProjectUpdate};

use super::TrackerError;

/// Operations against the project tracker.
///
/// # Example (mock for testing)
///
/// ```ignore
/// struct CountingGateway { calls: AtomicUsize }
///
/// #[async_trait]
/// impl TrackerGateway for CountingGateway {
///     async fn list_projects(&self) -> Result<Vec<Project>, TrackerError> {
///         self.calls.fetch_add(1, Ordering::SeqCst);
///         Ok(vec![])
///     }
///     // ...
/// }
/// ```
#[async_trait]
pub trait TrackerGateway: Send + Sync {
    /// Lists all projects visible to the configured credential.
    async fn list_projects(&self) -> Result<Vec<Project>, TrackerError>;

    /// Fetches one project. `Ok(None)` if the tracker does not know the id.
    async fn get_project(&self, id: &ProjectId) -> Result<Option<Project>, TrackerError>;

    /// Sets a project's state, and optionally its progress and description.
    async fn update_project(
        &self,
        id: &ProjectId,
        update: &ProjectUpdate,
    ) -> Result<Project, TrackerError>;

    /// Creates an issue, attached to `project` when given.
    async fn create_or_update_issue(
        &self,
        title: &str,
        description: &str,
        project: Option<&ProjectId>,
    ) -> Result<Issue, TrackerError>;
}
