//! HTTP server for the launch-readiness bot.
//!
//! This module implements the HTTP server that:
//! - Accepts webhooks from GitHub, validates signatures, and propagates them
//!   to the tracker
//! - Exposes a thin read/update API over tracker projects
//! - Provides health checks for liveness probes
//!
//! # Endpoints
//!
//! - `POST /api/github/webhook` - Accepts GitHub webhook deliveries
//! - `GET /api/linear/projects` - Lists projects
//! - `GET /api/linear/projects/{id}` - Fetches one project
//! - `PATCH /api/linear/projects/{id}` - Updates a project's state
//! - `GET /health` - Returns 200 if server is running

use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod health;
pub mod projects;
pub mod webhook;

pub use health::health_handler;
pub use projects::{get_project_handler, list_projects_handler, update_project_handler};
pub use webhook::webhook_handler;

use crate::config::Config;
use crate::tracker::TrackerGateway;
use crate::types::ProjectId;

/// Shared application state.
///
/// This is passed to all handlers via Axum's `State` extractor. It is built
/// once at startup and never changes.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Webhook secret for HMAC-SHA256 signature verification.
    webhook_secret: Vec<u8>,

    gateway: Arc<dyn TrackerGateway>,

    /// Target project for update intents, if configured.
    default_project: Option<ProjectId>,
}

impl AppState {
    /// Creates a new `AppState`.
    ///
    /// # Arguments
    ///
    /// * `webhook_secret` - Secret for verifying webhook signatures
    /// * `gateway` - Where tracker updates are sent
    /// * `default_project` - Project attached to every update intent
    pub fn new(
        webhook_secret: impl Into<Vec<u8>>,
        gateway: Arc<dyn TrackerGateway>,
        default_project: Option<ProjectId>,
    ) -> Self {
        AppState {
            inner: Arc::new(AppStateInner {
                webhook_secret: webhook_secret.into(),
                gateway,
                default_project,
            }),
        }
    }

    pub fn from_config(config: &Config, gateway: Arc<dyn TrackerGateway>) -> Self {
        Self::new(
            config.webhook_secret.as_bytes(),
            gateway,
            config.tracker.default_project.clone(),
        )
    }

    /// Returns the webhook secret.
    pub fn webhook_secret(&self) -> &[u8] {
        &self.inner.webhook_secret
    }

    pub fn gateway(&self) -> &dyn TrackerGateway {
        self.inner.gateway.as_ref()
    }

    pub fn default_project(&self) -> Option<&ProjectId> {
        self.inner.default_project.as_ref()
    }
}

/// Builds the axum Router with all endpoints.
pub fn build_router(app_state: AppState) -> axum::Router {
    use axum::routing::{get, post};

    axum::Router::new()
        .route("/api/github/webhook", post(webhook_handler))
        .route("/api/linear/projects", get(list_projects_handler))
        .route(
            "/api/linear/projects/{id}",
            get(get_project_handler).patch(update_project_handler),
        )
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
