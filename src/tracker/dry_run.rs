//! A gateway that logs instead of calling the tracker.
//!
//! Selected only by `DRY_RUN=true`. Every id it hands out starts with
//! `dry-run-` so fabricated results cannot be mistaken for real ones.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::types::{Issue, IssueId, Project, ProjectId, ProjectUpdate};

use super::{TrackerError, TrackerGateway};

/// Prefix on every id produced in dry-run mode.
pub const DRY_RUN_ID_PREFIX: &str = "dry-run-";

#[derive(Debug, Default)]
pub struct DryRunGateway {
    next_id: AtomicU64,
}

impl DryRunGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh_id(&self, kind: &str) -> String {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{DRY_RUN_ID_PREFIX}{kind}-{n}")
    }
}

#[async_trait]
impl TrackerGateway for DryRunGateway {
    async fn list_projects(&self) -> Result<Vec<Project>, TrackerError> {
        info!("[dry-run] would list projects");
        Ok(Vec::new())
    }

    async fn get_project(&self, id: &ProjectId) -> Result<Option<Project>, TrackerError> {
        info!(project_id = %id, "[dry-run] would fetch project");
        Ok(None)
    }

    async fn update_project(
        &self,
        id: &ProjectId,
        update: &ProjectUpdate,
    ) -> Result<Project, TrackerError> {
        info!(
            project_id = %id,
            state = %update.state,
            progress = ?update.progress.map(|p| p.value()),
            "[dry-run] would update project"
        );

        let now = Utc::now();
        Ok(Project {
            id: ProjectId::new(format!("{DRY_RUN_ID_PREFIX}{id}")),
            name: format!("{DRY_RUN_ID_PREFIX}project"),
            description: update.description.clone(),
            state: update.state.as_api_str().to_string(),
            created_at: now,
            updated_at: now,
            target_date: None,
            progress: update.progress,
        })
    }

    async fn create_or_update_issue(
        &self,
        title: &str,
        description: &str,
        project: Option<&ProjectId>,
    ) -> Result<Issue, TrackerError> {
        info!(title, project_id = ?project, "[dry-run] would create issue");

        let now = Utc::now();
        Ok(Issue {
            id: IssueId::new(self.fresh_id("issue")),
            title: title.to_string(),
            description: Some(description.to_string()),
            state: "dry_run".to_string(),
            project_id: project.cloned(),
            assignee_id: None,
            created_at: now,
            updated_at: now,
        })
    }
}
