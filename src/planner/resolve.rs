//! Task resolution.
//!
//! Maps each corrected entry's task identifier back to a concrete task
//! record from the caller-supplied pool. Break entries never hit the pool;
//! they get a synthesized pseudo-task. Identifiers the model hallucinated
//! resolve to nothing and the entry is dropped; the schedule just gets
//! shorter.

use chrono::Utc;
use uuid::Uuid;

use crate::planner::correct::CorrectedEntry;
use crate::types::{EntryKind, PlanEntry, Priority, Recurrence, Task, TaskStatus};

/// Reason attached when the model supplied none.
const DEFAULT_REASON: &str = "Scheduled work session";

/// Identifier the model uses for rest blocks.
const BREAK_TASK_ID: &str = "break";

/// Resolve corrected entries against the task pool.
pub fn resolve_entries(corrected: Vec<CorrectedEntry>, tasks: &[Task]) -> Vec<PlanEntry> {
    let total = corrected.len();
    let mut resolved = Vec::with_capacity(total);

    for entry in corrected {
        let task = if entry.kind == EntryKind::Break || entry.task_id == BREAK_TASK_ID {
            synthetic_break_task()
        } else {
            match tasks.iter().find(|t| t.id == entry.task_id) {
                Some(task) => task.clone(),
                None => continue,
            }
        };

        resolved.push(PlanEntry {
            time_slot: entry.time_slot,
            task,
            kind: entry.kind,
            reason: entry.reason.unwrap_or_else(|| DEFAULT_REASON.to_string()),
        });
    }

    let unresolved = total - resolved.len();
    if unresolved > 0 {
        log::warn!(
            "dropped {} schedule entr{} with unknown task ids",
            unresolved,
            if unresolved == 1 { "y" } else { "ies" },
        );
    }

    resolved
}

/// A rest block rendered as a task record.
///
/// The uuid suffix keeps applied plans from ever colliding with real task
/// ids.
fn synthetic_break_task() -> Task {
    Task {
        id: format!("break-{}", Uuid::new_v4()),
        title: "Break".to_string(),
        description: None,
        project_id: None,
        priority: Priority::Low,
        estimated_hours: 0.25,
        actual_hours: None,
        deadline: None,
        scheduled_start_time: None,
        time_slot: None,
        status: TaskStatus::Scheduled,
        tags: vec!["break".to_string()],
        dependencies: None,
        recurrence: Recurrence::Single,
        created_at: Utc::now(),
        completed_at: None,
        original_task_id: None,
        segment_index: None,
        segment_count: None,
    }
}
