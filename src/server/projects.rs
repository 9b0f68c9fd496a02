//! Read/update API over tracker projects.
//!
//! All responses share the `{success, message, data}` envelope.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use super::AppState;
use crate::tracker::TrackerError;
use crate::types::{Project, ProjectId, ProjectUpdate};

/// Response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    fn ok(message: &str, data: T) -> Json<Self> {
        Json(ApiResponse {
            success: true,
            message: message.to_string(),
            data: Some(data),
        })
    }
}

#[derive(Debug, Error)]
pub enum ProjectApiError {
    #[error("Project {0} not found")]
    NotFound(ProjectId),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("tracker error: {0}")]
    Tracker(#[from] TrackerError),
}

impl From<JsonRejection> for ProjectApiError {
    fn from(rejection: JsonRejection) -> Self {
        ProjectApiError::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for ProjectApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ProjectApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ProjectApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ProjectApiError::Tracker(_) => StatusCode::BAD_GATEWAY,
        };

        let body = ApiResponse::<()> {
            success: false,
            message: self.to_string(),
            data: None,
        };
        (status, Json(body)).into_response()
    }
}

/// `GET /api/linear/projects`
pub async fn list_projects_handler(
    State(app_state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Project>>>, ProjectApiError> {
    let projects = app_state.gateway().list_projects().await.inspect_err(|e| {
        warn!(error = %e, "Failed to list projects");
    })?;

    Ok(ApiResponse::ok("Projects retrieved successfully", projects))
}

/// `GET /api/linear/projects/{id}`
pub async fn get_project_handler(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Project>>, ProjectApiError> {
    let id = ProjectId::new(id);
    let project = app_state
        .gateway()
        .get_project(&id)
        .await
        .inspect_err(|e| warn!(project_id = %id, error = %e, "Failed to fetch project"))?
        .ok_or_else(|| ProjectApiError::NotFound(id.clone()))?;

    Ok(ApiResponse::ok("Project retrieved successfully", project))
}

/// `PATCH /api/linear/projects/{id}`
///
/// Body: `{"state": "...", "progress"?: 0..=100, "description"?: "..."}`.
/// Unknown states and out-of-range progress are rejected with 400 before the
/// tracker is contacted.
pub async fn update_project_handler(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProjectUpdate>, JsonRejection>,
) -> Result<Json<ApiResponse<Project>>, ProjectApiError> {
    let Json(update) = payload?;
    let id = ProjectId::new(id);

    let project = app_state
        .gateway()
        .update_project(&id, &update)
        .await
        .inspect_err(|e| warn!(project_id = %id, error = %e, "Failed to update project"))?;

    info!(project_id = %id, state = %update.state, "Project updated");
    Ok(ApiResponse::ok("Project updated successfully", project))
}
