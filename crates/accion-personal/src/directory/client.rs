use reqwest::header;
use serde_json::Value;
use tracing::{debug, warn};

use super::{project_supervisors, unwrap_roster, Supervisor};
use crate::config::DirectoryConfig;

/// Roster message shown when the upstream refused the request.
pub const AUTHORIZATION_ERROR_MESSAGE: &str = "Error de autorización API";
/// Roster message shown when the upstream could not be reached.
pub const CONNECTION_ERROR_MESSAGE: &str = "Error de conexión. Por favor, recarga la página.";

const ACTIVE_USERS_PATH: &str = "getActiveUsers";
const MESSAGE_LIMIT: usize = 500;
const PREVIEW_LIMIT: usize = 200;

/// Client for the internal personnel directory, holding the injected API key.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("directory request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("directory responded with status {0}")]
    Status(u16),
}

/// Normalized result of relaying one upstream call on behalf of a browser.
///
/// Mirrors the error bodies the serverless proxy used to emit: a non-success
/// upstream status carries `{error, status, message}`, a non-JSON body
/// carries `{error, contentType, preview}`.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayOutcome {
    Upstream { status: u16, body: Value },
    BackendError { status: u16, message: String },
    NotJson { content_type: String, preview: String },
    ParseFailed { message: String, preview: String },
    Unreachable { message: String },
}

impl DirectoryClient {
    pub fn new(config: &DirectoryConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            http: reqwest::Client::new(),
        }
    }

    /// Fetch the supervisor roster, once per form session.
    ///
    /// Fail-soft contract: any transport failure, non-success status, or
    /// malformed body collapses into a single-entry sentinel roster so the
    /// rest of the form stays usable. This method never returns an error.
    pub async fn fetch_supervisors(&self) -> Vec<Supervisor> {
        match self.fetch_roster().await {
            Ok(roster) => roster,
            Err(DirectoryError::Status(status)) => {
                warn!(status, "directory lookup refused");
                vec![Supervisor::unavailable(AUTHORIZATION_ERROR_MESSAGE)]
            }
            Err(err) => {
                warn!(error = %err, "directory lookup failed");
                vec![Supervisor::unavailable(CONNECTION_ERROR_MESSAGE)]
            }
        }
    }

    async fn fetch_roster(&self) -> Result<Vec<Supervisor>, DirectoryError> {
        let response = self.get(ACTIVE_USERS_PATH).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status(status.as_u16()));
        }

        // The backend is known to serve JSON under a text/html content type;
        // parse the body regardless and let the envelope step sort it out.
        let body = response.json::<Value>().await?;
        let (shape, records) = unwrap_roster(body);
        let roster = project_supervisors(records);
        debug!(shape = shape.label(), count = roster.len(), "roster fetched");
        Ok(roster)
    }

    /// Relay one GET through to the upstream directory, normalizing the
    /// response the way the old serverless proxy did.
    pub async fn relay(&self, path: &str) -> RelayOutcome {
        let response = match self.get(path).await {
            Ok(response) => response,
            Err(err) => {
                warn!(path, error = %err, "directory relay unreachable");
                return RelayOutcome::Unreachable {
                    message: err.to_string(),
                };
            }
        };

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_string();
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                return RelayOutcome::Unreachable {
                    message: err.to_string(),
                }
            }
        };

        if !(200..300).contains(&status) {
            warn!(path, status, "directory relay got error status");
            return RelayOutcome::BackendError {
                status,
                message: clip(&body, MESSAGE_LIMIT),
            };
        }

        if !content_type.contains("application/json") {
            warn!(path, content_type, "directory relay got non-JSON body");
            return RelayOutcome::NotJson {
                content_type,
                preview: clip(&body, PREVIEW_LIMIT),
            };
        }

        match serde_json::from_str::<Value>(&body) {
            Ok(value) => RelayOutcome::Upstream {
                status,
                body: value,
            },
            Err(err) => RelayOutcome::ParseFailed {
                message: err.to_string(),
                preview: clip(&body, PREVIEW_LIMIT),
            },
        }
    }

    async fn get(&self, path: &str) -> Result<reqwest::Response, reqwest::Error> {
        let target = self.target_url(path);
        self.http
            .get(&target)
            .header("x-api-key", &self.api_key)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
    }

    // Bare paths get the upstream "API/" prefix, already-prefixed ones pass through.
    fn target_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if path.starts_with("API/") {
            format!("{}/{}", self.base_url, path)
        } else {
            format!("{}/API/{}", self.base_url, path)
        }
    }
}

/// Truncate on a character boundary; the proxy caps error bodies so one bad
/// upstream page cannot flood the logs or the client.
fn clip(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
