//! Shared test utilities: a recording tracker gateway, sample domain values,
//! and arbitrary generators for property-based testing.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use crate::tracker::{TrackerError, TrackerGateway};
use crate::types::{Issue, IssueId, Progress, Project, ProjectId, ProjectUpdate};

/// A call observed by [`RecordingGateway`].
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    ListProjects,
    GetProject(ProjectId),
    UpdateProject {
        id: ProjectId,
        update: ProjectUpdate,
    },
    CreateIssue {
        title: String,
        description: String,
        project: Option<ProjectId>,
    },
}

/// In-memory gateway that records every call.
///
/// Failures are injected per operation: issue writes whose title contains a
/// configured substring, all project updates, or all reads.
#[derive(Debug, Default)]
pub struct RecordingGateway {
    calls: Mutex<Vec<GatewayCall>>,
    projects: Vec<Project>,
    fail_titles_containing: Option<String>,
    fail_project_updates: bool,
    fail_reads: bool,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projects(mut self, projects: Vec<Project>) -> Self {
        self.projects = projects;
        self
    }

    pub fn failing_on(mut self, title_fragment: &str) -> Self {
        self.fail_titles_containing = Some(title_fragment.to_string());
        self
    }

    pub fn failing_project_updates(mut self) -> Self {
        self.fail_project_updates = true;
        self
    }

    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().unwrap().push(call);
    }
}

fn injected() -> TrackerError {
    TrackerError::Status {
        status: 500,
        body: "injected failure".to_string(),
    }
}

#[async_trait]
impl TrackerGateway for RecordingGateway {
    async fn list_projects(&self) -> Result<Vec<Project>, TrackerError> {
        self.record(GatewayCall::ListProjects);
        if self.fail_reads {
            return Err(injected());
        }
        Ok(self.projects.clone())
    }

    async fn get_project(&self, id: &ProjectId) -> Result<Option<Project>, TrackerError> {
        self.record(GatewayCall::GetProject(id.clone()));
        if self.fail_reads {
            return Err(injected());
        }
        Ok(self.projects.iter().find(|p| &p.id == id).cloned())
    }

    async fn update_project(
        &self,
        id: &ProjectId,
        update: &ProjectUpdate,
    ) -> Result<Project, TrackerError> {
        self.record(GatewayCall::UpdateProject {
            id: id.clone(),
            update: update.clone(),
        });
        if self.fail_project_updates {
            return Err(injected());
        }

        let mut project = self
            .projects
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .unwrap_or_else(|| sample_project(id.as_str(), "Recorded"));
        project.state = update.state.as_api_str().to_string();
        project.progress = update.progress.or(project.progress);
        if let Some(description) = &update.description {
            project.description = Some(description.clone());
        }
        Ok(project)
    }

    async fn create_or_update_issue(
        &self,
        title: &str,
        description: &str,
        project: Option<&ProjectId>,
    ) -> Result<Issue, TrackerError> {
        let n = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(GatewayCall::CreateIssue {
                title: title.to_string(),
                description: description.to_string(),
                project: project.cloned(),
            });
            calls.len()
        };

        if let Some(fragment) = &self.fail_titles_containing
            && title.contains(fragment.as_str())
        {
            return Err(injected());
        }

        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Ok(Issue {
            id: IssueId::new(format!("issue-{n}")),
            title: title.to_string(),
            description: Some(description.to_string()),
            state: "Todo".to_string(),
            project_id: project.cloned(),
            assignee_id: None,
            created_at: at,
            updated_at: at,
        })
    }
}

/// A project with fixed timestamps and no progress.
pub fn sample_project(id: &str, name: &str) -> Project {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    Project {
        id: ProjectId::new(id),
        name: name.to_string(),
        description: None,
        state: "planned".to_string(),
        created_at: at,
        updated_at: at,
        target_date: None,
        progress: None,
    }
}

pub fn arb_progress() -> impl Strategy<Value = Progress> {
    (0.0f64..=100.0).prop_map(|v| Progress::new(v).unwrap())
}

/// A well-formed issue reference such as `ABC-123`.
pub fn arb_issue_ref_text() -> impl Strategy<Value = String> {
    ("[A-Z]{2,6}", 0u32..100_000).prop_map(|(key, n)| format!("{key}-{n}"))
}

/// Text that cannot contain an issue reference (no uppercase letters).
pub fn arb_ref_free_text() -> impl Strategy<Value = String> {
    "[a-z0-9 .,:_-]{0,80}".prop_map(String::from)
}
