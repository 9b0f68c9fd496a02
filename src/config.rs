//! Startup configuration.
//!
//! Configuration is read once from the environment (after loading `.env`,
//! if present) into an immutable [`Config`]. Request handling never looks at
//! the environment.
//!
//! | Variable | Required | Default |
//! |----------|----------|---------|
//! | `GITHUB_WEBHOOK_SECRET` | yes, non-empty | |
//! | `LINEAR_API_KEY` | unless `DRY_RUN=true` | |
//! | `LINEAR_API_URL` | no | `https://api.linear.app/graphql` |
//! | `LINEAR_PROJECT_ID` | no | none |
//! | `BIND_ADDR` | no | `0.0.0.0:8000` |
//! | `REQUEST_TIMEOUT_SECS` | no | `30` |
//! | `DRY_RUN` | no | `false` |

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use crate::tracker::DEFAULT_API_URL;
use crate::types::ProjectId;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors found while reading configuration. All are fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{0} is set but empty")]
    Empty(&'static str),

    #[error("{name} has invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// The shared webhook secret. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct WebhookSecret(Vec<u8>);

impl WebhookSecret {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WebhookSecret(<redacted>)")
    }
}

/// How tracker calls are carried out.
#[derive(Clone, PartialEq, Eq)]
pub enum TrackerMode {
    Linear { api_url: String, api_key: String },
    /// Log intended calls only. Selected explicitly with `DRY_RUN=true`.
    DryRun,
}

impl fmt::Debug for TrackerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerMode::Linear { api_url, .. } => f
                .debug_struct("Linear")
                .field("api_url", api_url)
                .finish_non_exhaustive(),
            TrackerMode::DryRun => f.write_str("DryRun"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    pub mode: TrackerMode,

    /// Project attached to every update intent, if any.
    pub default_project: Option<ProjectId>,

    pub request_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub webhook_secret: WebhookSecret,
    pub tracker: TrackerConfig,
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let webhook_secret = required(&lookup, "GITHUB_WEBHOOK_SECRET")?;

        let dry_run = match lookup("DRY_RUN") {
            Some(v) => parse_bool("DRY_RUN", &v)?,
            None => false,
        };

        let mode = if dry_run {
            TrackerMode::DryRun
        } else {
            TrackerMode::Linear {
                api_url: optional(&lookup, "LINEAR_API_URL")
                    .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
                api_key: required(&lookup, "LINEAR_API_KEY")?,
            }
        };

        let bind_addr =
            optional(&lookup, "BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                name: "BIND_ADDR",
                value: bind_addr.clone(),
                reason: e.to_string(),
            })?;

        let request_timeout = match optional(&lookup, "REQUEST_TIMEOUT_SECS") {
            Some(v) => {
                let secs = v.parse::<u64>().map_err(|e| ConfigError::Invalid {
                    name: "REQUEST_TIMEOUT_SECS",
                    value: v.clone(),
                    reason: e.to_string(),
                })?;
                if secs == 0 {
                    return Err(ConfigError::Invalid {
                        name: "REQUEST_TIMEOUT_SECS",
                        value: v,
                        reason: "must be at least 1".to_string(),
                    });
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        Ok(Config {
            bind_addr,
            webhook_secret: WebhookSecret(webhook_secret.into_bytes()),
            tracker: TrackerConfig {
                mode,
                default_project: optional(&lookup, "LINEAR_PROJECT_ID").map(ProjectId::new),
                request_timeout,
            },
        })
    }
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Err(ConfigError::Missing(name)),
        Some(v) if v.trim().is_empty() => Err(ConfigError::Empty(name)),
        Some(v) => Ok(v),
    }
}

/// Unset and blank are treated alike.
fn optional<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).filter(|v| !v.trim().is_empty())
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}
