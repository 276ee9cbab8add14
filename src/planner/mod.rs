//! Daily plan generation pipeline.
//!
//! One request, one collaborator call, then deterministic post-processing:
//! filter fixed events → build prompt → dispatch under a timeout → validate
//! the payload → correct the timeline → resolve task references → assemble
//! the response. The pipeline holds no state of its own; every input arrives
//! as a parameter and concurrent generations do not interact.

pub mod assemble;
pub mod correct;
pub mod dispatch;
pub mod prompt;
pub mod resolve;

use std::time::Duration;

use crate::config::PlannerConfig;
use crate::error::PlanError;
use crate::events::active_events_on;
use crate::types::{GeneratedPlan, PlanRequest};

use dispatch::{ChatCompletionClient, CompletionProvider};

/// Daily plan generator over a completion provider.
pub struct DailyPlanner<P> {
    provider: P,
    config: PlannerConfig,
}

impl DailyPlanner<ChatCompletionClient> {
    /// Planner backed by the production HTTP collaborator.
    pub fn from_config(config: PlannerConfig) -> Self {
        let provider = ChatCompletionClient::new(&config);
        Self { provider, config }
    }
}

impl<P: CompletionProvider> DailyPlanner<P> {
    pub fn new(provider: P, config: PlannerConfig) -> Self {
        Self { provider, config }
    }

    /// Generate a daily plan for one request.
    ///
    /// Fatal failures (configuration, transport, timeout, unusable payload)
    /// abort the whole generation. Non-fatal conditions (entries past the
    /// stop time, hallucinated task ids) shrink the schedule quietly.
    pub async fn generate(&self, request: &PlanRequest) -> Result<GeneratedPlan, PlanError> {
        let start_minutes = prompt::resolve_start_minutes(request, self.config.timezone)?;
        let stop_minutes = prompt::resolve_stop_minutes(request)?;

        let events = active_events_on(request.date, &request.fixed_events);
        log::debug!(
            "planning {}: window {}-{}, {} tasks, {} fixed events",
            request.date,
            crate::timeslot::hhmm_of(start_minutes),
            crate::timeslot::hhmm_of(stop_minutes),
            request.existing_tasks.len(),
            events.len(),
        );

        let prompt_text = prompt::build_prompt(request, &events, start_minutes, stop_minutes);

        let timeout = Duration::from_secs(self.config.request_timeout_secs);
        let content = match tokio::time::timeout(timeout, self.provider.complete(&prompt_text)).await
        {
            Ok(result) => result?,
            Err(_) => return Err(PlanError::Timeout(self.config.request_timeout_secs)),
        };

        let raw = dispatch::validate_plan_payload(&content)?;
        let proposed = raw.schedule.len();

        let corrected = correct::correct_schedule(&raw.schedule, start_minutes, stop_minutes);
        let resolved = resolve::resolve_entries(corrected, &request.existing_tasks);

        log::info!(
            "plan for {}: {} proposed, {} scheduled",
            request.date,
            proposed,
            resolved.len(),
        );

        Ok(assemble::assemble_plan(resolved, raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{NaiveDate, Utc};

    use crate::types::{
        EntryKind, EventCategory, FixedEvent, PlanPreferences, Priority, Recurrence, Task,
        TaskFrequencyStats, TaskStatus,
    };

    struct FixedProvider(String);

    #[async_trait]
    impl CompletionProvider for FixedProvider {
        async fn complete(&self, _prompt: &str) -> Result<String, PlanError> {
            Ok(self.0.clone())
        }
    }

    struct HangingProvider;

    #[async_trait]
    impl CompletionProvider for HangingProvider {
        async fn complete(&self, _prompt: &str) -> Result<String, PlanError> {
            std::future::pending().await
        }
    }

    fn task(id: &str) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {}", id),
            description: None,
            project_id: None,
            priority: Priority::High,
            estimated_hours: 1.5,
            actual_hours: None,
            deadline: None,
            scheduled_start_time: None,
            time_slot: None,
            status: TaskStatus::Pool,
            tags: Vec::new(),
            dependencies: None,
            recurrence: Recurrence::Single,
            created_at: Utc::now(),
            completed_at: None,
            original_task_id: None,
            segment_index: None,
            segment_count: None,
        }
    }

    fn request() -> PlanRequest {
        PlanRequest {
            date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            start_time: None,
            start_time_string: Some("09:00".to_string()),
            work_end_time: Some("12:00".to_string()),
            available_hours: 3.0,
            existing_tasks: vec![task("t1"), task("t2")],
            projects: Vec::new(),
            fixed_events: vec![FixedEvent {
                id: "lunch".to_string(),
                title: "Lunch".to_string(),
                start_time: "12:00".to_string(),
                end_time: "13:00".to_string(),
                days_of_week: vec![1, 2, 3, 4, 5],
                category: EventCategory::Meal,
                is_active: true,
                description: None,
            }],
            task_frequency_stats: TaskFrequencyStats::default(),
            preferences: PlanPreferences {
                work_style: "focused mornings".to_string(),
                focus_blocks: 2,
                break_frequency: 90,
            },
            user_preferences: None,
        }
    }

    fn planner(response: &str) -> DailyPlanner<FixedProvider> {
        DailyPlanner::new(
            FixedProvider(response.to_string()),
            PlannerConfig::new("sk-test"),
        )
    }

    #[tokio::test]
    async fn end_to_end_corrects_resolves_and_assembles() {
        let planner = planner(
            r#"{
                "schedule": [
                    {"timeSlot": "09:00-10:30", "taskId": "t1", "type": "focus", "reason": "deep work first"},
                    {"timeSlot": "10:30-10:45", "taskId": "break", "type": "break"},
                    {"timeSlot": "10:45-13:00", "taskId": "t2", "type": "regular"}
                ],
                "estimatedProductivity": 82
            }"#,
        );

        let plan = planner.generate(&request()).await.unwrap();

        // Third entry crosses the 12:00 stop and is dropped.
        assert_eq!(plan.schedule.len(), 2);
        assert_eq!(plan.schedule[0].time_slot, "09:00-10:30");
        assert_eq!(plan.schedule[0].task.id, "t1");
        assert_eq!(plan.schedule[1].time_slot, "10:30-10:45");
        assert_eq!(plan.schedule[1].kind, EntryKind::Break);
        assert!(plan.schedule[1].task.id.starts_with("break-"));

        assert_eq!(plan.estimated_productivity, 82.0);
        assert!(plan.suggestions.is_empty());
        assert!(!plan.project_analysis.risk_warning.is_empty());
    }

    #[tokio::test]
    async fn hallucinated_ids_shrink_the_schedule() {
        let planner = planner(
            r#"{
                "schedule": [
                    {"timeSlot": "09:00-10:00", "taskId": "t1", "type": "regular"},
                    {"timeSlot": "10:00-11:00", "taskId": "ghost-id", "type": "regular"}
                ]
            }"#,
        );

        let plan = planner.generate(&request()).await.unwrap();
        assert_eq!(plan.schedule.len(), 1);
        assert_eq!(plan.schedule[0].task.id, "t1");
        assert_eq!(plan.estimated_productivity, 75.0);
    }

    #[tokio::test]
    async fn schedule_less_payload_fails_with_missing_schedule() {
        let planner = planner(r#"{"suggestions": ["take a walk"]}"#);

        let err = planner.generate(&request()).await.unwrap_err();
        assert!(matches!(err, PlanError::MissingSchedule));
    }

    #[tokio::test]
    async fn prose_payload_fails_with_malformed_json() {
        let planner = planner("I had trouble making a plan today, sorry.");

        let err = planner.generate(&request()).await.unwrap_err();
        assert!(matches!(err, PlanError::MalformedJson(_)));
    }

    #[tokio::test]
    async fn malformed_start_string_aborts_before_dispatch() {
        let planner = planner(r#"{"schedule": []}"#);
        let mut req = request();
        req.start_time_string = Some("nine".to_string());

        let err = planner.generate(&req).await.unwrap_err();
        assert!(matches!(err, PlanError::MalformedTime(_)));
    }

    #[tokio::test]
    async fn hung_collaborator_times_out() {
        let mut config = PlannerConfig::new("sk-test");
        config.request_timeout_secs = 0;
        let planner = DailyPlanner::new(HangingProvider, config);

        let err = planner.generate(&request()).await.unwrap_err();
        assert!(matches!(err, PlanError::Timeout(0)));
        assert!(err.is_delivery_failure());
    }

    #[tokio::test]
    async fn empty_schedule_round_trips_to_empty_plan() {
        let planner = planner(r#"{"schedule": []}"#);

        let plan = planner.generate(&request()).await.unwrap();
        assert!(plan.schedule.is_empty());
        assert_eq!(plan.estimated_productivity, 75.0);
    }
}
