//! Planning prompt construction.
//!
//! Produces a bounded natural-language request: the task list is capped at
//! [`MAX_PROMPT_TASKS`] entries (the true total is stated separately so the
//! model knows what it is not seeing), and the output contract is spelled
//! out verbatim. The model is instructed to follow it but never trusted to;
//! the corrector repairs whatever comes back.

use chrono::{Timelike, Utc};
use chrono_tz::Tz;

use crate::error::PlanError;
use crate::timeslot::{hhmm_of, minutes_of};
use crate::types::{FixedEvent, PlanRequest, Project};

/// Cap on tasks embedded in the prompt, bounding payload size.
pub const MAX_PROMPT_TASKS: usize = 15;

/// Hard stop applied when the caller supplies none.
pub const DEFAULT_WORK_END: &str = "18:00";

/// Resolve the effective start time in minutes since midnight.
///
/// Fallback order: explicit `"HH:mm"` string, explicit instant (hour/minute
/// extracted in the configured zone), current time in the configured zone.
pub fn resolve_start_minutes(request: &PlanRequest, timezone: Tz) -> Result<u32, PlanError> {
    if let Some(ref hhmm) = request.start_time_string {
        return minutes_of(hhmm);
    }
    if let Some(instant) = request.start_time {
        let local = instant.with_timezone(&timezone);
        return Ok(local.hour() * 60 + local.minute());
    }
    let now = Utc::now().with_timezone(&timezone);
    Ok(now.hour() * 60 + now.minute())
}

/// Resolve the hard stop time in minutes since midnight.
pub fn resolve_stop_minutes(request: &PlanRequest) -> Result<u32, PlanError> {
    minutes_of(request.work_end_time.as_deref().unwrap_or(DEFAULT_WORK_END))
}

/// Assemble the planning prompt.
///
/// `active_events` is the already-filtered fixed-event list for the request
/// date; `start_minutes`/`stop_minutes` come from the resolvers above.
pub fn build_prompt(
    request: &PlanRequest,
    active_events: &[FixedEvent],
    start_minutes: u32,
    stop_minutes: u32,
) -> String {
    let mut sections: Vec<String> = Vec::new();

    sections.push(format!(
        "You are a personal daily planning assistant. Build a schedule for {} \
         that starts at {} and ends no later than {}. The user has about {:.1} \
         hours available.",
        request.date,
        hhmm_of(start_minutes),
        hhmm_of(stop_minutes),
        request.available_hours,
    ));

    sections.push(format!(
        "Work preferences: {} focus blocks, a break roughly every {} minutes, \
         style \"{}\".",
        request.preferences.focus_blocks,
        request.preferences.break_frequency,
        request.preferences.work_style,
    ));

    if !active_events.is_empty() {
        let lines: Vec<String> = active_events
            .iter()
            .map(|e| {
                let mut line = format!("- {}-{} {}", e.start_time, e.end_time, e.title);
                if let Some(ref desc) = e.description {
                    line.push_str(&format!(" ({})", desc));
                }
                line
            })
            .collect();
        sections.push(format!(
            "Fixed events today (never schedule tasks over these):\n{}",
            lines.join("\n")
        ));
    }

    let stats = &request.task_frequency_stats;
    sections.push(format!(
        "Portfolio: {} projects, {} tasks in total ({} daily, {} weekly, {} \
         monthly, {} one-off).",
        request.projects.len(),
        request.existing_tasks.len(),
        stats.daily,
        stats.weekly,
        stats.monthly,
        stats.single,
    ));

    let shown = request.existing_tasks.len().min(MAX_PROMPT_TASKS);
    let task_lines: Vec<String> = request
        .existing_tasks
        .iter()
        .take(MAX_PROMPT_TASKS)
        .map(|task| {
            let mut line = format!(
                "- id={} \"{}\" priority={:?} est={:.2}h",
                task.id,
                task.title,
                task.priority,
                task.estimated_hours,
            );
            if let Some(project) = task
                .project_id
                .as_deref()
                .and_then(|id| find_project(&request.projects, id))
            {
                line.push_str(&format!(
                    " project=\"{}\" ({:?})",
                    project.name, project.priority
                ));
            }
            if let Some(deadline) = task.deadline {
                line.push_str(&format!(" deadline={}", deadline.format("%Y-%m-%d")));
            }
            line
        })
        .collect();
    sections.push(format!(
        "Candidate tasks (showing {} of {}):\n{}",
        shown,
        request.existing_tasks.len(),
        task_lines.join("\n")
    ));

    if let Some(ref prefs) = request.user_preferences {
        if !prefs.is_empty() {
            sections.push(format!("Additional user instructions: {}", prefs));
        }
    }

    sections.push(format!(
        "Respond with a single JSON object, no surrounding prose:\n\
         {{\n\
         \x20 \"schedule\": [{{\"timeSlot\": \"HH:mm-HH:mm\", \"taskId\": \"<id or 'break'>\", \"type\": \"focus|regular|break\", \"reason\": \"...\"}}],\n\
         \x20 \"suggestions\": [\"...\"],\n\
         \x20 \"estimatedProductivity\": 0-100,\n\
         \x20 \"projectAnalysis\": {{\"highValueProjects\": \"...\", \"timeAllocation\": \"...\", \"riskWarning\": \"...\"}}\n\
         }}\n\
         The first slot must start at {} and each slot must begin exactly \
         where the previous one ends. Do not schedule past {}.",
        hhmm_of(start_minutes),
        hhmm_of(stop_minutes),
    ));

    sections.join("\n\n")
}

fn find_project<'a>(projects: &'a [Project], id: &str) -> Option<&'a Project> {
    projects.iter().find(|p| p.id == id)
}
