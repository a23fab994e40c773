//! Plan service error taxonomy

use thiserror::Error;

/// Fallback message for a service failure that carried no message.
pub const GENERIC_SERVICE_ERROR: &str = "Failed to generate plan";

/// Fallback message when the backend cannot be reached at all.
pub const GENERIC_TRANSPORT_ERROR: &str =
    "Failed to connect to the backend. Please make sure the backend server is running.";

/// Errors from the plan request client.
///
/// All three variants recover at the call site into a single user-visible
/// message; none are fatal.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The prompt was empty after trimming. No network call was made.
    #[error("Please enter a project description")]
    EmptyPrompt,

    /// The call succeeded but the service signaled failure
    /// (`success: false` in the response envelope).
    #[error("{0}")]
    ServiceReported(String),

    /// The network call itself failed, or the response was non-2xx or
    /// unparseable.
    #[error("{0}")]
    Transport(String),
}
