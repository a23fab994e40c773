//! HTTP implementation of the plan service client
//!
//! Talks to the planning backend over its JSON envelope contract:
//! POST `/api/plan` with `{"prompt": ...}`, expecting
//! `{"success": true, "plan": ...}` or `{"success": false, "error": ...}`.
//! One outbound request per call; no retries, no caching.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::{HealthStatus, PlanService};
use crate::client::error::{GENERIC_SERVICE_ERROR, GENERIC_TRANSPORT_ERROR, PlanError};
use crate::config::ServiceConfig;

/// Response envelope for `/api/plan`.
#[derive(Debug, Deserialize)]
struct PlanEnvelope {
    success: bool,
    plan: Option<Value>,
    error: Option<String>,
}

/// Error body optionally carried by non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// HTTP client for the planning service.
pub struct HttpPlanService {
    base_url: String,
    http: Client,
}

impl HttpPlanService {
    /// Create a client from the service configuration.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, PlanError> {
        debug!(?config, "HttpPlanService::from_config: called");
        let timeout = Duration::from_millis(config.timeout_ms);
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PlanError::Transport(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl PlanService for HttpPlanService {
    async fn request_plan(&self, prompt: &str) -> Result<Value, PlanError> {
        debug!(prompt_len = prompt.len(), "request_plan: called");
        let prompt = prompt.trim();
        if prompt.is_empty() {
            debug!("request_plan: empty prompt, no network call");
            return Err(PlanError::EmptyPrompt);
        }

        let url = format!("{}/api/plan", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "prompt": prompt }))
            .send()
            .await
            .map_err(|e| {
                debug!(error = %e, "request_plan: network error");
                PlanError::Transport(GENERIC_TRANSPORT_ERROR.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            debug!(error = %e, "request_plan: failed to read body");
            PlanError::Transport(GENERIC_TRANSPORT_ERROR.to_string())
        })?;

        if !status.is_success() {
            // A non-2xx body may still carry a useful error message.
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .filter(|msg| !msg.is_empty())
                .unwrap_or_else(|| GENERIC_TRANSPORT_ERROR.to_string());
            debug!(%status, %message, "request_plan: non-2xx response");
            return Err(PlanError::Transport(message));
        }

        let envelope: PlanEnvelope = serde_json::from_str(&body).map_err(|e| {
            debug!(error = %e, "request_plan: unparseable 2xx body");
            PlanError::Transport(GENERIC_TRANSPORT_ERROR.to_string())
        })?;

        if !envelope.success {
            let message = envelope
                .error
                .filter(|msg| !msg.is_empty())
                .unwrap_or_else(|| GENERIC_SERVICE_ERROR.to_string());
            debug!(%message, "request_plan: service reported failure");
            return Err(PlanError::ServiceReported(message));
        }

        debug!("request_plan: success");
        Ok(envelope.plan.unwrap_or(Value::Null))
    }

    async fn health(&self) -> Result<HealthStatus, PlanError> {
        debug!("health: called");
        let url = format!("{}/api/health", self.base_url);
        let response = self.http.get(&url).send().await.map_err(|e| {
            debug!(error = %e, "health: network error");
            PlanError::Transport(GENERIC_TRANSPORT_ERROR.to_string())
        })?;

        if !response.status().is_success() {
            let status = response.status();
            debug!(%status, "health: non-2xx response");
            return Err(PlanError::Transport(format!("Health check failed with status {}", status)));
        }

        let health: HealthStatus = response.json().await.map_err(|e| {
            debug!(error = %e, "health: unparseable body");
            PlanError::Transport(GENERIC_TRANSPORT_ERROR.to_string())
        })?;
        debug!(status = %health.status, "health: received");
        Ok(health)
    }
}
