//! `TrackerGateway` implementation over Linear's GraphQL API.
//!
//! Response nodes are decoded into private camelCase structs first, then
//! converted into the domain types. Two response shapes are accepted for each
//! mutation: the `createIssue`/`updateProject` spelling and Linear's current
//! `issueCreate`/`projectUpdate`. Workflow states may arrive as a plain string
//! or as an object with a `name`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::types::{Issue, IssueId, Progress, Project, ProjectId, ProjectUpdate};

use super::client::LinearClient;
use super::{TrackerError, TrackerGateway};

// ─── GraphQL Documents ────────────────────────────────────────────────────────

const PROJECT_FIELDS: &str = "id name description state createdAt updatedAt targetDate progress";

const ISSUE_FIELDS: &str =
    "id title description state { name } project { id } assignee { id } createdAt updatedAt";

fn list_projects_query() -> String {
    format!("query {{ projects {{ nodes {{ {PROJECT_FIELDS} }} }} }}")
}

fn get_project_query() -> String {
    format!("query($id: String!) {{ project(id: $id) {{ {PROJECT_FIELDS} }} }}")
}

fn update_project_mutation() -> String {
    format!(
        "mutation($id: String!, $state: String!, $progress: Float, $description: String) {{ \
         projectUpdate(id: $id, input: {{ state: $state, progress: $progress, description: $description }}) \
         {{ project {{ {PROJECT_FIELDS} }} }} }}"
    )
}

fn create_issue_mutation() -> String {
    format!(
        "mutation($title: String!, $description: String!, $projectId: String) {{ \
         issueCreate(input: {{ title: $title, description: $description, projectId: $projectId }}) \
         {{ issue {{ {ISSUE_FIELDS} }} }} }}"
    )
}

// ─── Response Types ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StateField {
    Name(String),
    Object { name: String },
}

impl StateField {
    fn into_name(self) -> String {
        match self {
            StateField::Name(name) | StateField::Object { name } => name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct IdRef {
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectNode {
    id: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    state: StateField,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    target_date: Option<String>,
    #[serde(default)]
    progress: Option<f64>,
}

impl TryFrom<ProjectNode> for Project {
    type Error = TrackerError;

    fn try_from(node: ProjectNode) -> Result<Self, Self::Error> {
        let progress = node
            .progress
            .map(Progress::new)
            .transpose()
            .map_err(|e| TrackerError::malformed(format!("project {}: {e}", node.id)))?;

        Ok(Project {
            id: ProjectId::new(node.id),
            name: node.name,
            description: node.description,
            state: node.state.into_name(),
            created_at: node.created_at,
            updated_at: node.updated_at,
            target_date: node.target_date,
            progress,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssueNode {
    id: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    state: StateField,
    #[serde(default)]
    project_id: Option<String>,
    #[serde(default)]
    project: Option<IdRef>,
    #[serde(default)]
    assignee_id: Option<String>,
    #[serde(default)]
    assignee: Option<IdRef>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<IssueNode> for Issue {
    fn from(node: IssueNode) -> Self {
        Issue {
            id: IssueId::new(node.id),
            title: node.title,
            description: node.description,
            state: node.state.into_name(),
            project_id: node
                .project_id
                .or(node.project.map(|p| p.id))
                .map(ProjectId::new),
            assignee_id: node.assignee_id.or(node.assignee.map(|a| a.id)),
            created_at: node.created_at,
            updated_at: node.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Connection<T> {
    nodes: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct ProjectsData {
    projects: Connection<ProjectNode>,
}

#[derive(Debug, Deserialize)]
struct ProjectData {
    project: Option<ProjectNode>,
}

#[derive(Debug, Deserialize)]
struct ProjectPayload {
    project: Option<ProjectNode>,
}

#[derive(Debug, Deserialize)]
struct UpdateProjectData {
    #[serde(rename = "projectUpdate", alias = "updateProject")]
    payload: ProjectPayload,
}

#[derive(Debug, Deserialize)]
struct IssuePayload {
    issue: Option<IssueNode>,
}

#[derive(Debug, Deserialize)]
struct CreateIssueData {
    #[serde(rename = "issueCreate", alias = "createIssue")]
    payload: IssuePayload,
}

// ─── Gateway Implementation ───────────────────────────────────────────────────

#[async_trait]
impl TrackerGateway for LinearClient {
    async fn list_projects(&self) -> Result<Vec<Project>, TrackerError> {
        let data: ProjectsData = self.execute(&list_projects_query(), json!({})).await?;
        data.projects
            .nodes
            .into_iter()
            .map(Project::try_from)
            .collect()
    }

    async fn get_project(&self, id: &ProjectId) -> Result<Option<Project>, TrackerError> {
        let data: ProjectData = self
            .execute(&get_project_query(), json!({ "id": id }))
            .await?;
        data.project.map(Project::try_from).transpose()
    }

    async fn update_project(
        &self,
        id: &ProjectId,
        update: &ProjectUpdate,
    ) -> Result<Project, TrackerError> {
        debug!(project_id = %id, state = %update.state, "Updating project");

        let variables = json!({
            "id": id,
            "state": update.state.as_api_str(),
            "progress": update.progress,
            "description": update.description,
        });
        let data: UpdateProjectData = self.execute(&update_project_mutation(), variables).await?;

        data.payload
            .project
            .ok_or_else(|| TrackerError::malformed("project update returned no project"))?
            .try_into()
    }

    async fn create_or_update_issue(
        &self,
        title: &str,
        description: &str,
        project: Option<&ProjectId>,
    ) -> Result<Issue, TrackerError> {
        debug!(title, project_id = ?project, "Creating issue");

        let variables = json!({
            "title": title,
            "description": description,
            "projectId": project,
        });
        let data: CreateIssueData = self.execute(&create_issue_mutation(), variables).await?;

        data.payload
            .issue
            .map(Issue::from)
            .ok_or_else(|| TrackerError::malformed("issue create returned no issue"))
    }
}
