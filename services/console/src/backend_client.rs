//! Typed client for the detection backend's control and log endpoints

use std::sync::Arc;

use serde::Deserialize;

use crate::io::HttpClient;
use crate::subsystem::Subsystem;

/// Control endpoint response body
#[derive(Debug, Deserialize)]
struct ControlResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    #[allow(dead_code)]
    status: Option<String>,
}

/// Client for the backend's HTTP API
pub struct BackendClient {
    base_url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, http: Arc<dyn HttpClient>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        tracing::debug!("Created BackendClient for {}", base_url);
        Self { base_url, http }
    }

    /// Ask the backend to start the monitored system
    pub async fn start(&self) -> crate::Result<()> {
        self.control("/start").await
    }

    /// Ask the backend to stop the monitored system
    pub async fn stop(&self) -> crate::Result<()> {
        self.control("/stop").await
    }

    async fn control(&self, path: &str) -> crate::Result<()> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.get(&url).await?;
        if response.status != 200 {
            return Err(crate::ConsoleError::Http(format!(
                "{} returned status {}",
                url, response.status
            )));
        }

        let parsed: ControlResponse = serde_json::from_str(&response.body)?;
        match parsed.error {
            // An empty error field counts as success, same as the backend's
            // own clients treat it.
            Some(error) if !error.is_empty() => Err(crate::ConsoleError::Backend(error)),
            _ => Ok(()),
        }
    }

    /// Fetch the latest log lines for a subsystem's stream
    pub async fn fetch_stream(&self, subsystem: Subsystem) -> crate::Result<Vec<String>> {
        let url = format!("{}{}", self.base_url, subsystem.stream_path());
        let response = self.http.get(&url).await?;
        if response.status != 200 {
            return Err(crate::ConsoleError::Http(format!(
                "{} returned status {}",
                url, response.status
            )));
        }

        let lines: Vec<String> = serde_json::from_str(&response.body)?;
        Ok(lines)
    }
}
