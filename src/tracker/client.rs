//! HTTP client for Linear's GraphQL endpoint.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;

use super::TrackerError;

/// Default Linear GraphQL endpoint.
pub const DEFAULT_API_URL: &str = "https://api.linear.app/graphql";

/// A Linear API client bound to one endpoint and credential.
///
/// Cheap to clone; the underlying `reqwest::Client` shares its connection pool.
#[derive(Clone)]
pub struct LinearClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

impl LinearClient {
    /// Creates a client. `timeout` bounds each request end to end.
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TrackerError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(LinearClient {
            http,
            api_url: api_url.into(),
            api_key: api_key.into(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Runs a GraphQL operation and decodes its `data` member.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<T, TrackerError> {
        debug!(api_url = %self.api_url, "Sending GraphQL request");

        let response = self
            .http
            .post(&self.api_url)
            .header(AUTHORIZATION, &self.api_key)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TrackerError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let parsed: GraphQlResponse<T> = serde_json::from_slice(&bytes)
            .map_err(|e| TrackerError::malformed(format!("invalid response body: {e}")))?;

        if !parsed.errors.is_empty() {
            return Err(TrackerError::GraphQl {
                messages: parsed.errors.into_iter().map(|e| e.message).collect(),
            });
        }

        parsed
            .data
            .ok_or_else(|| TrackerError::malformed("response has no data"))
    }
}

impl std::fmt::Debug for LinearClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinearClient")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}
