//! Webhook handling for GitHub events.
//!
//! This module provides:
//! - Signature verification for webhook payloads (HMAC-SHA256)
//! - Event types and payload parsing
//! - Pure event handlers producing work units

pub mod events;
pub mod handlers;
pub mod parser;
pub mod signature;

pub use events::{
    EventKind, GitHubEvent, PrAction, PullRequestEvent, PushCommit, PushEvent, WorkflowRunEvent,
};
pub use handlers::{HandlerResult, handle_event};
pub use parser::{ParseError, parse_webhook};
pub use signature::{
    SignatureError, compute_signature, format_signature_header, parse_signature_header,
    verify_signature,
};
