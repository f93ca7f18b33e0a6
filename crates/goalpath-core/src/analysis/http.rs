//! Plan service client over HTTP.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use super::PlanAnalyzer;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Posts `{"goal": "..."}` to a plan endpoint and returns the raw body.
pub struct HttpPlanAnalyzer {
    client: Client,
    endpoint: String,
}

#[derive(Serialize)]
struct PlanRequest<'a> {
    goal: &'a str,
}

impl HttpPlanAnalyzer {
    /// Create a client for `endpoint` (the full URL, e.g.
    /// `http://localhost:3001/generate-plan`).
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PlanAnalyzer for HttpPlanAnalyzer {
    fn name(&self) -> &str {
        "http"
    }

    async fn request_plan(&self, goal: &str) -> anyhow::Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&PlanRequest { goal })
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("plan service error ({}): {}", status, body);
        }

        let body = response
            .text()
            .await
            .context("failed to read plan service response")?;
        debug!(endpoint = %self.endpoint, bytes = body.len(), "plan service responded");
        Ok(body)
    }
}
