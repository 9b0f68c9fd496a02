//! GitHub webhook payload parser.
//!
//! This module parses raw webhook JSON payloads into typed [`GitHubEvent`] values.
//!
//! # Parsing Strategy
//!
//! 1. The event kind is determined from the `X-GitHub-Event` header
//! 2. The payload is parsed according to that kind
//! 3. Unknown event types return `Ok(None)` (acknowledged, not an error)
//! 4. Payloads that don't match the declared kind's shape return `Err`;
//!    nothing is partially populated
//!
//! The signature must already have been verified against the raw bytes
//! before calling into this module.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::workflow::{RunConclusion, RunStatus};

use super::events::{
    EventKind, GitHubEvent, PrAction, PullRequestEvent, PushCommit, PushEvent, WorkflowRunEvent,
};

/// Error type for webhook parsing failures.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON deserialization failed (includes missing required fields).
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Field is present but has an unusable value.
    #[error("invalid field value for {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },
}

/// Parses a webhook payload into a typed event.
///
/// # Arguments
///
/// * `event_type` - The value of the `X-GitHub-Event` header
/// * `payload` - The raw JSON payload bytes
///
/// # Returns
///
/// * `Ok(Some(event))` - Successfully parsed a handled event type
/// * `Ok(None)` - Unhandled event type
/// * `Err(e)` - Malformed payload or missing required fields
///
/// # Examples
///
/// ```
/// use launch_readiness::webhooks::{GitHubEvent, parse_webhook};
///
/// let payload = br#"{
///     "action": "opened",
///     "pull_request": {
///         "title": "Implement XYZ-789",
///         "body": null,
///         "merged_at": null,
///         "html_url": "https://github.com/org/repo/pull/42"
///     }
/// }"#;
///
/// let event = parse_webhook("pull_request", payload).unwrap();
/// assert!(matches!(event, Some(GitHubEvent::PullRequest(_))));
///
/// assert!(parse_webhook("issues", b"{}").unwrap().is_none());
/// ```
pub fn parse_webhook(event_type: &str, payload: &[u8]) -> Result<Option<GitHubEvent>, ParseError> {
    match EventKind::from_header(event_type) {
        EventKind::Push => parse_push(payload).map(|e| Some(GitHubEvent::Push(e))),
        EventKind::PullRequest => {
            parse_pull_request(payload).map(|e| Some(GitHubEvent::PullRequest(e)))
        }
        EventKind::WorkflowRun => {
            parse_workflow_run(payload).map(|e| Some(GitHubEvent::WorkflowRun(e)))
        }
        EventKind::Unknown => Ok(None),
    }
}

// ============================================================================
// Raw payload structures for deserialization
//
// These match GitHub's webhook JSON structure, restricted to the fields we use.
// Unknown fields are ignored.
// ============================================================================

/// Returns an error if a required string field is empty.
fn require_non_empty(field: &'static str, value: &str) -> Result<(), ParseError> {
    if value.trim().is_empty() {
        return Err(ParseError::InvalidField {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

// ============================================================================
// push event
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawPushPayload {
    #[serde(rename = "ref")]
    ref_name: String,
    before: String,
    after: String,
    commits: Vec<RawCommit>,
}

#[derive(Debug, Deserialize)]
struct RawCommit {
    id: String,
    message: String,
    timestamp: DateTime<Utc>,
    url: String,
    author: RawCommitAuthor,
}

/// Commit author as embedded in push payloads.
///
/// GitHub sends `username` for authors linked to an account; older payload
/// samples use `login` instead.
#[derive(Debug, Deserialize)]
struct RawCommitAuthor {
    #[serde(default, alias = "login")]
    username: Option<String>,
}

fn parse_push(payload: &[u8]) -> Result<PushEvent, ParseError> {
    let raw: RawPushPayload = serde_json::from_slice(payload)?;

    require_non_empty("ref", &raw.ref_name)?;

    let commits = raw
        .commits
        .into_iter()
        .map(|c| {
            require_non_empty("commits[].id", &c.id)?;
            Ok(PushCommit {
                id: c.id,
                message: c.message,
                timestamp: c.timestamp,
                author_login: c.author.username,
                url: c.url,
            })
        })
        .collect::<Result<Vec<_>, ParseError>>()?;

    Ok(PushEvent {
        git_ref: raw.ref_name,
        before_sha: raw.before,
        after_sha: raw.after,
        commits,
    })
}

// ============================================================================
// pull_request event
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawPullRequestPayload {
    action: String,
    pull_request: RawPullRequest,
}

#[derive(Debug, Deserialize)]
struct RawPullRequest {
    title: String,
    body: Option<String>,
    merged_at: Option<DateTime<Utc>>,
    html_url: String,
}

fn parse_pull_request(payload: &[u8]) -> Result<PullRequestEvent, ParseError> {
    let raw: RawPullRequestPayload = serde_json::from_slice(payload)?;

    require_non_empty("action", &raw.action)?;

    Ok(PullRequestEvent {
        action: PrAction::from_api_str(&raw.action),
        title: raw.pull_request.title,
        body: raw.pull_request.body,
        merged_at: raw.pull_request.merged_at,
        url: raw.pull_request.html_url,
    })
}

// ============================================================================
// workflow_run event
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawWorkflowRunPayload {
    workflow_run: RawWorkflowRun,
}

#[derive(Debug, Deserialize)]
struct RawWorkflowRun {
    name: String,
    status: String,
    conclusion: Option<String>,
    head_branch: Option<String>,
    url: String,
    // Present in live deliveries; `url` is the API URL there.
    html_url: Option<String>,
}

fn parse_workflow_run(payload: &[u8]) -> Result<WorkflowRunEvent, ParseError> {
    let raw: RawWorkflowRunPayload = serde_json::from_slice(payload)?;
    let run = raw.workflow_run;

    require_non_empty("workflow_run.status", &run.status)?;

    Ok(WorkflowRunEvent {
        name: run.name,
        status: RunStatus::from_api_str(&run.status),
        conclusion: run.conclusion.as_deref().map(RunConclusion::from_api_str),
        head_branch: run.head_branch,
        url: run.html_url.unwrap_or(run.url),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== push ====================

    #[test]
    fn parse_push_with_commits() {
        let payload = r#"{
            "ref": "refs/heads/main",
            "before": "1111111111111111111111111111111111111111",
            "after": "2222222222222222222222222222222222222222",
            "commits": [
                {
                    "id": "abc123",
                    "message": "feat: implement new feature ABC-123",
                    "timestamp": "2024-02-20T12:00:00Z",
                    "url": "https://github.com/org/repo/commit/abc123",
                    "author": { "name": "Test User", "email": "t@example.com", "username": "testuser" }
                },
                {
                    "id": "def456",
                    "message": "chore: bump deps",
                    "timestamp": "2024-02-20T13:00:00+01:00",
                    "url": "https://github.com/org/repo/commit/def456",
                    "author": { "name": "Bot" }
                }
            ],
            "repository": { "name": "repo", "owner": { "login": "org" } }
        }"#;

        let event = parse_webhook("push", payload.as_bytes())
            .unwrap()
            .expect("should parse");

        match event {
            GitHubEvent::Push(e) => {
                assert_eq!(e.git_ref, "refs/heads/main");
                assert_eq!(e.before_sha, "1111111111111111111111111111111111111111");
                assert_eq!(e.after_sha, "2222222222222222222222222222222222222222");
                assert_eq!(e.commits.len(), 2);
                assert_eq!(e.commits[0].id, "abc123");
                assert_eq!(e.commits[0].author_login.as_deref(), Some("testuser"));
                assert_eq!(e.commits[1].author_login, None);
                // Offsets are normalised to UTC
                assert_eq!(
                    e.commits[1].timestamp.to_rfc3339(),
                    "2024-02-20T12:00:00+00:00"
                );
            }
            other => panic!("expected Push, got {:?}", other),
        }
    }

    #[test]
    fn parse_push_accepts_login_author_field() {
        let payload = r#"{
            "ref": "refs/heads/main",
            "before": "a",
            "after": "b",
            "commits": [{
                "id": "abc123",
                "message": "ABC-1",
                "timestamp": "2024-02-20T12:00:00Z",
                "url": "https://github.com/org/repo/commit/abc123",
                "author": { "login": "testuser", "id": 456, "type": "User" }
            }]
        }"#;

        let event = parse_webhook("push", payload.as_bytes()).unwrap().unwrap();
        let GitHubEvent::Push(e) = event else {
            panic!("expected Push");
        };
        assert_eq!(e.commits[0].author_login.as_deref(), Some("testuser"));
    }

    #[test]
    fn parse_push_without_commits() {
        let payload = r#"{"ref": "refs/tags/v1", "before": "a", "after": "b", "commits": []}"#;
        let event = parse_webhook("push", payload.as_bytes()).unwrap().unwrap();
        assert!(matches!(event, GitHubEvent::Push(ref e) if e.commits.is_empty()));
    }

    #[test]
    fn parse_push_bad_timestamp_is_error() {
        let payload = r#"{
            "ref": "refs/heads/main", "before": "a", "after": "b",
            "commits": [{
                "id": "abc", "message": "m", "timestamp": "yesterday",
                "url": "u", "author": {}
            }]
        }"#;
        assert!(matches!(
            parse_webhook("push", payload.as_bytes()),
            Err(ParseError::JsonError(_))
        ));
    }

    #[test]
    fn parse_push_empty_commit_id_is_error() {
        let payload = r#"{
            "ref": "refs/heads/main", "before": "a", "after": "b",
            "commits": [{
                "id": "", "message": "m", "timestamp": "2024-02-20T12:00:00Z",
                "url": "u", "author": {}
            }]
        }"#;
        assert!(matches!(
            parse_webhook("push", payload.as_bytes()),
            Err(ParseError::InvalidField {
                field: "commits[].id",
                ..
            })
        ));
    }

    // ==================== pull_request ====================

    #[test]
    fn parse_pull_request_closed_merged() {
        let payload = r#"{
            "action": "closed",
            "number": 42,
            "pull_request": {
                "number": 42,
                "title": "Feature: Implement XYZ-789",
                "body": "Implements XYZ-789",
                "merged_at": "2024-02-21T09:30:00Z",
                "html_url": "https://github.com/org/repo/pull/42"
            }
        }"#;

        let event = parse_webhook("pull_request", payload.as_bytes())
            .unwrap()
            .expect("should parse");

        match event {
            GitHubEvent::PullRequest(e) => {
                assert_eq!(e.action, PrAction::Closed);
                assert_eq!(e.title, "Feature: Implement XYZ-789");
                assert_eq!(e.body.as_deref(), Some("Implements XYZ-789"));
                assert!(e.is_merged());
                assert_eq!(e.url, "https://github.com/org/repo/pull/42");
            }
            other => panic!("expected PullRequest, got {:?}", other),
        }
    }

    #[test]
    fn parse_pull_request_other_action_is_kept() {
        let payload = r#"{
            "action": "labeled",
            "pull_request": {
                "title": "t", "body": null, "merged_at": null,
                "html_url": "https://github.com/org/repo/pull/1"
            }
        }"#;

        let event = parse_webhook("pull_request", payload.as_bytes()).unwrap().unwrap();
        let GitHubEvent::PullRequest(e) = event else {
            panic!("expected PullRequest");
        };
        assert_eq!(e.action, PrAction::Other("labeled".to_string()));
        assert!(!e.is_merged());
        assert!(e.body.is_none());
    }

    #[test]
    fn parse_pull_request_missing_title_is_error() {
        let payload = r#"{
            "action": "opened",
            "pull_request": { "body": null, "merged_at": null, "html_url": "u" }
        }"#;
        assert!(matches!(
            parse_webhook("pull_request", payload.as_bytes()),
            Err(ParseError::JsonError(_))
        ));
    }

    #[test]
    fn push_shaped_payload_under_pull_request_header_is_error() {
        let payload = r#"{"ref": "refs/heads/main", "before": "a", "after": "b", "commits": []}"#;
        assert!(parse_webhook("pull_request", payload.as_bytes()).is_err());
    }

    // ==================== workflow_run ====================

    #[test]
    fn parse_workflow_run_completed() {
        let payload = r#"{
            "action": "completed",
            "workflow_run": {
                "id": 123456,
                "name": "CI/CD Pipeline",
                "status": "completed",
                "conclusion": "success",
                "head_branch": "feature/ABC-123",
                "url": "https://api.github.com/repos/org/repo/actions/runs/123456",
                "html_url": "https://github.com/org/repo/actions/runs/123456"
            }
        }"#;

        let event = parse_webhook("workflow_run", payload.as_bytes())
            .unwrap()
            .expect("should parse");

        match event {
            GitHubEvent::WorkflowRun(e) => {
                assert_eq!(e.name, "CI/CD Pipeline");
                assert_eq!(e.status, RunStatus::Completed);
                assert_eq!(e.conclusion, Some(RunConclusion::Success));
                assert_eq!(e.head_branch.as_deref(), Some("feature/ABC-123"));
                assert_eq!(e.url, "https://github.com/org/repo/actions/runs/123456");
            }
            other => panic!("expected WorkflowRun, got {:?}", other),
        }
    }

    #[test]
    fn parse_workflow_run_falls_back_to_url() {
        let payload = r#"{
            "workflow_run": {
                "name": "CI",
                "status": "queued",
                "conclusion": null,
                "head_branch": null,
                "url": "https://github.com/org/repo/actions/runs/1"
            }
        }"#;

        let event = parse_webhook("workflow_run", payload.as_bytes()).unwrap().unwrap();
        let GitHubEvent::WorkflowRun(e) = event else {
            panic!("expected WorkflowRun");
        };
        assert_eq!(e.status, RunStatus::Queued);
        assert_eq!(e.conclusion, None);
        assert_eq!(e.head_branch, None);
        assert_eq!(e.url, "https://github.com/org/repo/actions/runs/1");
    }

    #[test]
    fn parse_workflow_run_empty_status_is_error() {
        let payload = r#"{
            "workflow_run": {
                "name": "CI", "status": "", "conclusion": null,
                "head_branch": "main", "url": "u"
            }
        }"#;
        assert!(matches!(
            parse_webhook("workflow_run", payload.as_bytes()),
            Err(ParseError::InvalidField {
                field: "workflow_run.status",
                ..
            })
        ));
    }

    // ==================== generic ====================

    #[test]
    fn unknown_event_type_returns_none() {
        let result = parse_webhook("issues", b"{\"action\": \"opened\"}").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn unknown_event_type_ignores_body_entirely() {
        // Not even JSON - still acknowledged, not rejected
        assert!(parse_webhook("ping", b"not json").unwrap().is_none());
    }

    #[test]
    fn malformed_json_returns_error() {
        let result = parse_webhook("push", b"not json");
        assert!(matches!(result, Err(ParseError::JsonError(_))));
    }
}
