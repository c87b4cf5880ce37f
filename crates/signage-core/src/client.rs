use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::config::ClientConfig;
use crate::snapshot::DashboardSnapshot;

/// Shown whenever the backend does not supply its own error message.
pub const FALLBACK_MESSAGE: &str =
    "Failed to fetch dashboard data. Please ensure the backend service is running.";

/// The only error surfaces ever see from a fetch. Transport failures,
/// error statuses and undecodable bodies all collapse into one message;
/// the raw cause goes to the log instead.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct OverviewError {
    pub message: String,
}

impl OverviewError {
    fn fallback() -> Self {
        Self {
            message: FALLBACK_MESSAGE.to_string(),
        }
    }
}

/// Source of dashboard overview snapshots. One call, one snapshot; no
/// retry, no caching, no state shared between calls.
#[async_trait]
pub trait OverviewApi: Send + Sync {
    async fn fetch_overview(&self) -> Result<DashboardSnapshot, OverviewError>;
}

/// HTTP implementation against the backend overview endpoint.
#[derive(Debug, Clone)]
pub struct HttpOverviewClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpOverviewClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.overview_url(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl OverviewApi for HttpOverviewClient {
    async fn fetch_overview(&self) -> Result<DashboardSnapshot, OverviewError> {
        let response = match self.http.get(&self.endpoint).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(endpoint = %self.endpoint, error = %err, "overview request failed");
                return Err(OverviewError::fallback());
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            warn!(endpoint = %self.endpoint, %status, "backend returned error status");
            return Err(normalized_error(&body));
        }

        match response.json::<DashboardSnapshot>().await {
            Ok(snapshot) => Ok(snapshot),
            Err(err) => {
                warn!(endpoint = %self.endpoint, error = %err, "failed to decode overview body");
                Err(OverviewError::fallback())
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct BackendErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<BackendErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct BackendErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

/// Pull a human-readable message out of an error response body. The
/// backend nests it under `error.message`; older builds put it at the top
/// level. Both are optional, so every access is an explicit presence check.
fn backend_message(body: &[u8]) -> Option<String> {
    let parsed: BackendErrorBody = serde_json::from_slice(body).ok()?;
    let nested = parsed.error.and_then(|detail| detail.message);
    nested
        .or(parsed.message)
        .filter(|message| !message.is_empty())
}

fn normalized_error(body: &[u8]) -> OverviewError {
    match backend_message(body) {
        Some(message) => OverviewError { message },
        None => OverviewError::fallback(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_taken_from_nested_error_body() {
        let body = br#"{"error": {"message": "backend overloaded"}}"#;
        assert_eq!(backend_message(body).as_deref(), Some("backend overloaded"));
    }

    #[test]
    fn top_level_message_is_accepted() {
        let body = br#"{"message": "maintenance window"}"#;
        assert_eq!(
            backend_message(body).as_deref(),
            Some("maintenance window")
        );
    }

    #[test]
    fn nested_message_wins_over_top_level() {
        let body = br#"{"message": "outer", "error": {"message": "inner"}}"#;
        assert_eq!(backend_message(body).as_deref(), Some("inner"));
    }

    #[test]
    fn absent_or_empty_messages_yield_nothing() {
        assert_eq!(backend_message(b""), None);
        assert_eq!(backend_message(b"not json"), None);
        assert_eq!(backend_message(br#"{"error": {}}"#), None);
        assert_eq!(backend_message(br#"{"error": {"message": ""}}"#), None);
    }

    #[test]
    fn normalized_error_falls_back_without_a_message() {
        let err = normalized_error(b"");
        assert_eq!(err.message, FALLBACK_MESSAGE);

        let err = normalized_error(br#"{"error": {"message": "backend overloaded"}}"#);
        assert_eq!(err.message, "backend overloaded");
    }

    #[test]
    fn error_display_is_just_the_message() {
        let err = normalized_error(br#"{"error": {"message": "backend overloaded"}}"#);
        assert_eq!(err.to_string(), "backend overloaded");
    }
}
