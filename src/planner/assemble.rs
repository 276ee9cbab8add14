//! Response assembly.
//!
//! The full default table for missing model output lives here and nowhere
//! else. Presence checks only: a present field passes through unchanged even
//! when semantically odd (a productivity estimate above 100 is the model's
//! problem, not ours to clamp).

use crate::planner::dispatch::RawPlan;
use crate::types::{GeneratedPlan, PlanEntry, ProjectAnalysis};

/// Productivity estimate used when the model omits one.
pub const DEFAULT_PRODUCTIVITY: f64 = 75.0;

const DEFAULT_HIGH_VALUE_PROJECTS: &str = "No project analysis available";
const DEFAULT_TIME_ALLOCATION: &str = "No time allocation analysis available";
const DEFAULT_RISK_WARNING: &str = "No risk warnings";

/// Combine the resolved schedule with the rest of the model output,
/// substituting defaults for anything absent.
pub fn assemble_plan(schedule: Vec<PlanEntry>, raw: RawPlan) -> GeneratedPlan {
    let analysis = raw.project_analysis.unwrap_or_default();

    GeneratedPlan {
        schedule,
        suggestions: raw.suggestions.unwrap_or_default(),
        estimated_productivity: raw.estimated_productivity.unwrap_or(DEFAULT_PRODUCTIVITY),
        project_analysis: ProjectAnalysis {
            high_value_projects: analysis
                .high_value_projects
                .unwrap_or_else(|| DEFAULT_HIGH_VALUE_PROJECTS.to_string()),
            time_allocation: analysis
                .time_allocation
                .unwrap_or_else(|| DEFAULT_TIME_ALLOCATION.to_string()),
            risk_warning: analysis
                .risk_warning
                .unwrap_or_else(|| DEFAULT_RISK_WARNING.to_string()),
        },
    }
}
