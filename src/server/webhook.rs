//! Webhook endpoint handler.
//!
//! Accepts GitHub webhook deliveries, verifies their signatures, runs the
//! matching event handler and dispatches the resulting work units to the
//! tracker before responding.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::AppState;
use crate::effects::{UpdateOutcome, dispatch_units};
use crate::webhooks::{
    EventKind, HandlerResult, ParseError, SignatureError, handle_event, parse_webhook,
    verify_signature,
};

/// Header name for GitHub event type.
pub const HEADER_EVENT: &str = "x-github-event";
/// Header name for GitHub signature.
pub const HEADER_SIGNATURE: &str = "x-hub-signature-256";

/// Errors that can occur when processing a webhook.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// No signature header on the request.
    #[error("missing signature")]
    MissingSignature,

    /// Signature does not match the payload.
    #[error("invalid signature")]
    InvalidSignature,

    /// Missing required header.
    #[error("missing required header: {0}")]
    MissingHeader(&'static str),

    /// Payload does not match the declared event type.
    #[error("invalid payload: {0}")]
    Parse(#[from] ParseError),

    /// The server cannot verify signatures as configured.
    #[error("server misconfigured: {0}")]
    Configuration(#[from] SignatureError),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = match &self {
            WebhookError::MissingSignature | WebhookError::InvalidSignature => {
                StatusCode::UNAUTHORIZED
            }
            WebhookError::MissingHeader(_) | WebhookError::Parse(_) => StatusCode::BAD_REQUEST,
            WebhookError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

/// Body of a successful webhook response.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub message: String,

    /// One outcome per work unit, in subject order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updates: Option<Vec<UpdateOutcome>>,
}

/// Webhook handler.
///
/// # Request
///
/// - Method: POST
/// - Required headers:
///   - `X-Hub-Signature-256`: HMAC-SHA256 signature of the payload
///   - `X-GitHub-Event`: Event type (e.g., "push", "pull_request")
/// - Body: JSON webhook payload
///
/// # Response
///
/// - 200 OK: `{message, updates?}`. Tracker failures are reported per unit
///   inside `updates`, not as an error status. Push responses always carry
///   `updates`; other events only when something was dispatched.
/// - 400 Bad Request: Missing event header or invalid payload
/// - 401 Unauthorized: Missing or invalid signature
/// - 500 Internal Server Error: No usable webhook secret
pub async fn webhook_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookResponse>, WebhookError> {
    let signature_header =
        get_header(&headers, HEADER_SIGNATURE).map_err(|_| WebhookError::MissingSignature)?;

    // Verify against the raw bytes BEFORE any parsing.
    match verify_signature(&body, &signature_header, app_state.webhook_secret()) {
        Ok(true) => {}
        Ok(false) => {
            warn!("Invalid webhook signature");
            return Err(WebhookError::InvalidSignature);
        }
        Err(e) => {
            error!(error = %e, "Cannot verify webhook signature");
            return Err(WebhookError::Configuration(e));
        }
    }

    let event_type = get_header(&headers, HEADER_EVENT)?;
    debug!(event_type = %event_type, bytes = body.len(), "Received webhook");

    let event = match parse_webhook(&event_type, &body) {
        Ok(Some(event)) => event,
        Ok(None) => {
            info!(event_type = %event_type, "Unhandled GitHub event type");
            let result = HandlerResult::not_handled(&event_type);
            return Ok(Json(WebhookResponse {
                message: result.message,
                updates: None,
            }));
        }
        Err(e) => {
            warn!(event_type = %event_type, error = %e, "Invalid webhook payload");
            return Err(e.into());
        }
    };

    let result = handle_event(&event, app_state.default_project());
    let always_report = event.kind() == EventKind::Push;
    let report = always_report || !result.is_empty();

    let outcomes = dispatch_units(app_state.gateway(), result.units).await;

    info!(
        event_type = %event_type,
        units = outcomes.len(),
        failed = outcomes.iter().filter(|o| o.is_error()).count(),
        "Webhook processed"
    );

    Ok(Json(WebhookResponse {
        message: result.message,
        updates: report.then_some(outcomes),
    }))
}

/// Extracts a required header value as a string.
fn get_header(headers: &HeaderMap, name: &'static str) -> Result<String, WebhookError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .ok_or(WebhookError::MissingHeader(name))
}
