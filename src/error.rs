//! Error types for plan generation
//!
//! Errors are classified by where the failure sits:
//! - Delivery: credentials missing, transport failure, timeout; the
//!   collaborator was never reached or never answered
//! - Response: the collaborator answered but the payload is unusable
//! - Input: a caller-supplied time string failed to parse
//!
//! All variants are fatal to the current generation request. Quiet
//! degradations (entries dropped past the stop time, unresolved task
//! references) are not errors; they shrink the schedule and are logged by
//! the pipeline.

use thiserror::Error;

/// Error types for plan generation
#[derive(Debug, Error)]
pub enum PlanError {
    // Delivery failures
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("HTTP: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Completion API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Completion request timed out after {0} seconds")]
    Timeout(u64),

    // Unusable responses
    #[error("Completion service returned no content")]
    EmptyResponse,

    #[error("Completion payload is not valid JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("Completion payload has no schedule array")]
    MissingSchedule,

    // Bad input
    #[error("Malformed time string: {0:?} (expected \"HH:mm\")")]
    MalformedTime(String),
}

impl PlanError {
    /// Returns true if the collaborator was never reached or never answered.
    ///
    /// These point at configuration or connectivity, not at the model.
    pub fn is_delivery_failure(&self) -> bool {
        matches!(
            self,
            PlanError::Configuration(_)
                | PlanError::Http(_)
                | PlanError::Api { .. }
                | PlanError::Timeout(_)
        )
    }

    /// Returns true if the collaborator answered but the response was unusable.
    ///
    /// These point at the prompt or the model, not at the deployment.
    pub fn is_unusable_response(&self) -> bool {
        matches!(
            self,
            PlanError::EmptyResponse | PlanError::MalformedJson(_) | PlanError::MissingSchedule
        )
    }

    /// Get a user-friendly recovery suggestion
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PlanError::Configuration(_) => "Check the planner credentials and endpoint settings.",
            PlanError::Http(_) => "Check your internet connection and try again.",
            PlanError::Api { .. } => {
                "The completion service rejected the request. Check the API key and model name."
            }
            PlanError::Timeout(_) => "The completion service took too long. Try again.",
            PlanError::EmptyResponse | PlanError::MalformedJson(_) | PlanError::MissingSchedule => {
                "The model returned an unusable plan. Regenerate the schedule."
            }
            PlanError::MalformedTime(_) => "Times must be in 24-hour HH:mm format.",
        }
    }
}
