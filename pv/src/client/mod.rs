//! Plan service client
//!
//! The [`PlanService`] trait is the seam between the UI and the remote
//! planning backend. The production implementation is HTTP; tests swap in
//! scripted implementations.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

mod error;
mod http;

pub use error::{GENERIC_SERVICE_ERROR, GENERIC_TRANSPORT_ERROR, PlanError};
pub use http::HttpPlanService;

/// Status reported by the backend health endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: Option<String>,
    /// Absent on older backends.
    pub planning_agent_initialized: Option<bool>,
}

/// Client for the remote planning service.
///
/// Each call is independent: one outbound request, the raw plan document
/// back. Superseding an in-flight request is the caller's concern; the
/// client neither cancels nor retries.
#[async_trait]
pub trait PlanService: Send + Sync {
    /// Request a plan for the given free-text project description.
    ///
    /// The prompt is trimmed first; an empty prompt fails with
    /// [`PlanError::EmptyPrompt`] before any network activity.
    async fn request_plan(&self, prompt: &str) -> Result<Value, PlanError>;

    /// Check whether the backend is up and its planning agent is ready.
    async fn health(&self) -> Result<HealthStatus, PlanError>;
}
