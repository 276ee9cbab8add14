//! Planner configuration.
//!
//! Everything the pipeline needs beyond the per-request inputs: collaborator
//! credentials and endpoint, the planning timezone, and the dispatcher
//! timeout. Credentials are checked up front; a missing key fails before
//! any work is attempted.

use chrono_tz::Tz;

use crate::error::PlanError;

/// Environment variable holding the completion API key.
pub const API_KEY_VAR: &str = "DAYPLAN_API_KEY";

/// Configuration for the daily planner.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Completion API key (bearer token).
    pub api_key: String,
    /// Base URL of an OpenAI-compatible completion endpoint.
    pub base_url: String,
    /// Model identifier sent with each completion request.
    pub model: String,
    /// Civil timezone used to resolve "now" and caller-supplied instants.
    pub timezone: Tz,
    /// Hard deadline on the single collaborator call, in seconds.
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

/// UTC+8 civil zone of the reference deployment; no DST transitions.
fn default_timezone() -> Tz {
    chrono_tz::Asia::Singapore
}

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

impl PlannerConfig {
    /// Build a config with defaults for everything but the API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            model: default_model(),
            timezone: default_timezone(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    /// Load configuration from the environment.
    ///
    /// `DAYPLAN_API_KEY` is required; `DAYPLAN_BASE_URL`, `DAYPLAN_MODEL`,
    /// `DAYPLAN_TIMEZONE` (IANA name) and `DAYPLAN_TIMEOUT_SECS` override
    /// the defaults when set.
    pub fn from_env() -> Result<Self, PlanError> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                PlanError::Configuration(format!("{} is not set", API_KEY_VAR))
            })?;

        let mut config = Self::new(api_key);

        if let Ok(url) = std::env::var("DAYPLAN_BASE_URL") {
            if !url.is_empty() {
                config.base_url = url;
            }
        }
        if let Ok(model) = std::env::var("DAYPLAN_MODEL") {
            if !model.is_empty() {
                config.model = model;
            }
        }
        if let Ok(tz) = std::env::var("DAYPLAN_TIMEZONE") {
            config.timezone = tz.parse().map_err(|_| {
                PlanError::Configuration(format!("Invalid timezone: {}", tz))
            })?;
        }
        if let Ok(secs) = std::env::var("DAYPLAN_TIMEOUT_SECS") {
            config.request_timeout_secs = secs.parse().map_err(|_| {
                PlanError::Configuration(format!("Invalid timeout: {}", secs))
            })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_applies_defaults() {
        let config = PlannerConfig::new("sk-test");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.timezone, chrono_tz::Asia::Singapore);
        assert_eq!(config.request_timeout_secs, 60);
    }

    #[test]
    fn timezone_names_parse() {
        let tz: Result<Tz, _> = "Europe/Berlin".parse();
        assert!(tz.is_ok());
        let bad: Result<Tz, _> = "UTC+8".parse();
        assert!(bad.is_err());
    }
}
