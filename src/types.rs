//! Domain model for the daily planner.
//!
//! Tasks, projects, and fixed events are read-only snapshots handed to the
//! planner by the caller; the planner never reaches into a shared store.
//! `PlanRequest` / `GeneratedPlan` are the request and response envelopes of
//! one generation cycle. Field names follow the camelCase wire format of the
//! surrounding application.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Task
// =============================================================================

/// Task urgency, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    High,
    Medium,
    Low,
}

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Unscheduled and eligible for inclusion in a generated plan.
    Pool,
    Scheduled,
    InProgress,
    Completed,
}

/// How often a task re-enters the pool after completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    Single,
    Daily,
    Weekly,
    Monthly,
}

/// A unit of work.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub priority: Priority,
    /// Estimated duration in hours, positive.
    pub estimated_hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_start_time: Option<DateTime<Utc>>,
    /// `"HH:mm-HH:mm"`. Always well-formed on planner output; the corrector
    /// guarantees end after start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<String>,
    pub status: TaskStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<String>>,
    #[serde(default = "default_recurrence")]
    pub recurrence: Recurrence,
    pub created_at: DateTime<Utc>,
    /// Set iff `status == Completed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Parent task when this task is one segment of a split.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_count: Option<u32>,
}

fn default_recurrence() -> Recurrence {
    Recurrence::Single
}

// =============================================================================
// Project
// =============================================================================

/// Revenue classification of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectPriority {
    /// Actively earning money today.
    CoreRevenue,
    /// Earning, but not yet a main income source.
    EmergingRevenue,
    /// Expected to earn once shipped.
    PreRevenue,
    /// Exploratory or learning work with no revenue expectation.
    Exploratory,
    /// Kept alive, no active investment.
    Maintenance,
}

/// A grouping of tasks. Read-only input to prompt construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: ProjectPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry_id: Option<String>,
    pub duration_days: u32,
    #[serde(default)]
    pub milestones: Vec<String>,
}

// =============================================================================
// Fixed events
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Meal,
    Break,
    Commute,
    Exercise,
    Other,
}

/// A recurring calendar block the planner must not schedule tasks over.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedEvent {
    pub id: String,
    pub title: String,
    /// `"HH:mm"`.
    pub start_time: String,
    /// `"HH:mm"`.
    pub end_time: String,
    /// Days this event occurs on. 0 = Sunday … 6 = Saturday.
    pub days_of_week: Vec<u8>,
    pub category: EventCategory,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_true() -> bool {
    true
}

// =============================================================================
// Plan request
// =============================================================================

/// User planning preferences embedded into the prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanPreferences {
    #[serde(default)]
    pub work_style: String,
    /// Desired number of deep-focus blocks in the day.
    pub focus_blocks: u32,
    /// Minutes of work between breaks.
    pub break_frequency: u32,
}

/// How many tasks of each recurrence type exist, for the model's awareness.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFrequencyStats {
    #[serde(default)]
    pub daily: u32,
    #[serde(default)]
    pub weekly: u32,
    #[serde(default)]
    pub monthly: u32,
    #[serde(default)]
    pub single: u32,
}

/// Inbound plan-generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    /// Calendar date being planned.
    pub date: NaiveDate,
    /// Explicit start instant; hour/minute are extracted in the planner's
    /// configured timezone. Overridden by `start_time_string`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    /// Explicit `"HH:mm"` start; wins over `start_time`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time_string: Option<String>,
    /// `"HH:mm"` hard stop; defaults to 18:00.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_end_time: Option<String>,
    pub available_hours: f64,
    /// The task pool offered to the model; also the lookup universe for
    /// resolving the returned schedule.
    #[serde(default)]
    pub existing_tasks: Vec<Task>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub fixed_events: Vec<FixedEvent>,
    #[serde(default)]
    pub task_frequency_stats: TaskFrequencyStats,
    pub preferences: PlanPreferences,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_preferences: Option<String>,
}

// =============================================================================
// Generated plan
// =============================================================================

/// Kind of a schedule entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Focus,
    Regular,
    Break,
}

/// One time-boxed unit of a generated plan. Ephemeral: discarded once the
/// user applies or dismisses the plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEntry {
    /// `"HH:mm-HH:mm"`, contiguous with its neighbours.
    pub time_slot: String,
    pub task: Task,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub reason: String,
}

/// Model commentary on the project portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAnalysis {
    pub high_value_projects: String,
    pub time_allocation: String,
    pub risk_warning: String,
}

/// Outbound plan-generation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPlan {
    pub schedule: Vec<PlanEntry>,
    pub suggestions: Vec<String>,
    /// 0–100 intended range; passed through unclamped.
    pub estimated_productivity: f64,
    pub project_analysis: ProjectAnalysis,
}
