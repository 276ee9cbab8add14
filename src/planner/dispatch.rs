//! Plan request dispatch and payload validation.
//!
//! The completion collaborator sits behind [`CompletionProvider`] so the
//! pipeline can be driven hermetically in tests. [`ChatCompletionClient`] is
//! the production implementation: one OpenAI-style `/chat/completions` call
//! requesting a JSON object, single attempt, no retry.
//!
//! Validation is a separate, explicit step: [`validate_plan_payload`] turns
//! the raw text into a typed [`RawPlan`] or a tagged error before any field
//! is read downstream.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::PlannerConfig;
use crate::error::PlanError;

// ---------------------------------------------------------------------------
// Provider seam
// ---------------------------------------------------------------------------

/// The external completion collaborator: prompt in, unstructured text out.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, PlanError>;
}

// ---------------------------------------------------------------------------
// HTTP client
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI-compatible chat-completions client.
pub struct ChatCompletionClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl ChatCompletionClient {
    pub fn new(config: &PlannerConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl CompletionProvider for ChatCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String, PlanError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "response_format": { "type": "json_object" },
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PlanError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(PlanError::EmptyResponse);
        }
        Ok(content)
    }
}

// ---------------------------------------------------------------------------
// Payload validation
// ---------------------------------------------------------------------------

/// The model's proposed plan, shape-checked but otherwise untrusted.
///
/// Every entry field is optional; the corrector and resolver decide what a
/// missing or garbage value means.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlan {
    #[serde(default)]
    pub schedule: Vec<RawScheduleEntry>,
    #[serde(default)]
    pub suggestions: Option<Vec<String>>,
    #[serde(default)]
    pub estimated_productivity: Option<f64>,
    #[serde(default)]
    pub project_analysis: Option<RawProjectAnalysis>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScheduleEntry {
    #[serde(default)]
    pub time_slot: Option<String>,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProjectAnalysis {
    #[serde(default)]
    pub high_value_projects: Option<String>,
    #[serde(default)]
    pub time_allocation: Option<String>,
    #[serde(default)]
    pub risk_warning: Option<String>,
}

/// Validate the collaborator's text into a [`RawPlan`].
///
/// Fails with `MalformedJson` when no JSON object parses out of the text and
/// `MissingSchedule` when the object lacks an array-typed `schedule` field.
pub fn validate_plan_payload(content: &str) -> Result<RawPlan, PlanError> {
    let json_str = extract_json_object(content).unwrap_or_else(|| content.trim());
    let value: serde_json::Value = serde_json::from_str(json_str)?;

    match value.get("schedule") {
        Some(serde_json::Value::Array(_)) => {}
        _ => return Err(PlanError::MissingSchedule),
    }

    Ok(serde_json::from_value(value)?)
}

/// Locate a JSON object inside model output that may carry markdown fences
/// or surrounding prose.
fn extract_json_object(response: &str) -> Option<&str> {
    // ```json fence
    if let Some(start) = response.find("```json") {
        let body = &response[start + 7..];
        if let Some(end) = body.find("```") {
            return Some(body[..end].trim());
        }
    }

    // Bare object, possibly embedded in prose: balance braces, skipping
    // string literals.
    let offset = response.find('{')?;
    let candidate = &response[offset..];
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escape = false;
    for (i, ch) in candidate.char_indices() {
        if escape {
            escape = false;
            continue;
        }
        match ch {
            '\\' if in_string => escape = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&candidate[..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_payload_parses() {
        let raw = validate_plan_payload(
            r#"{
                "schedule": [
                    {"timeSlot": "09:00-10:30", "taskId": "t1", "type": "focus", "reason": "deep work"}
                ],
                "suggestions": ["front-load the hard task"],
                "estimatedProductivity": 82,
                "projectAnalysis": {"highValueProjects": "p1", "timeAllocation": "ok", "riskWarning": "none"}
            }"#,
        )
        .unwrap();

        assert_eq!(raw.schedule.len(), 1);
        assert_eq!(raw.schedule[0].task_id.as_deref(), Some("t1"));
        assert_eq!(raw.estimated_productivity, Some(82.0));
    }

    #[test]
    fn fenced_payload_parses() {
        let raw = validate_plan_payload(
            "Here is your plan:\n```json\n{\"schedule\": []}\n```\nEnjoy!",
        )
        .unwrap();
        assert!(raw.schedule.is_empty());
    }

    #[test]
    fn embedded_object_is_found() {
        let raw = validate_plan_payload("Sure! {\"schedule\": [], \"suggestions\": []} done")
            .unwrap();
        assert!(raw.schedule.is_empty());
        assert_eq!(raw.suggestions, Some(Vec::new()));
    }

    #[test]
    fn missing_schedule_is_distinct() {
        let err = validate_plan_payload(r#"{"suggestions": []}"#).unwrap_err();
        assert!(matches!(err, PlanError::MissingSchedule));
    }

    #[test]
    fn non_array_schedule_is_missing_schedule() {
        let err = validate_plan_payload(r#"{"schedule": "busy day"}"#).unwrap_err();
        assert!(matches!(err, PlanError::MissingSchedule));
    }

    #[test]
    fn garbage_is_malformed_json() {
        let err = validate_plan_payload("I could not produce a schedule today.").unwrap_err();
        assert!(matches!(err, PlanError::MalformedJson(_)));
    }

    #[test]
    fn entries_tolerate_missing_fields() {
        let raw = validate_plan_payload(r#"{"schedule": [{}, {"taskId": "t2"}]}"#).unwrap();
        assert_eq!(raw.schedule.len(), 2);
        assert!(raw.schedule[0].time_slot.is_none());
        assert!(raw.schedule[0].kind.is_none());
    }

    #[test]
    fn braces_inside_strings_do_not_confuse_extraction() {
        let raw = validate_plan_payload(
            r#"{"schedule": [{"taskId": "t1", "reason": "close the {open} loop"}]}"#,
        )
        .unwrap();
        assert_eq!(raw.schedule[0].reason.as_deref(), Some("close the {open} loop"));
    }
}
