//! Schedule correction.
//!
//! The model is asked to start its first slot at the supplied start time and
//! chain every slot off the previous one, but it is unreliable at arithmetic
//! and at respecting the stop boundary. This pass ignores the proposed times
//! entirely except as a source of duration and ordering: a strict
//! left-to-right walk re-derives an authoritative timeline that is
//! contiguous, non-overlapping, and contained in `[start, stop]` no matter
//! what came back.

use crate::planner::dispatch::RawScheduleEntry;
use crate::timeslot::{duration_minutes, slot_of};
use crate::types::EntryKind;

/// Fallback durations when a proposed slot is absent or garbage.
const BREAK_DEFAULT_MINUTES: u32 = 15;
const FOCUS_DEFAULT_MINUTES: u32 = 90;
const REGULAR_DEFAULT_MINUTES: u32 = 60;

/// A schedule entry with an authoritative, re-derived time slot.
#[derive(Debug, Clone)]
pub struct CorrectedEntry {
    pub time_slot: String,
    pub task_id: String,
    pub kind: EntryKind,
    pub reason: Option<String>,
}

/// Re-derive the timeline of a proposed schedule.
///
/// Walks the entries in model order with a cursor starting at
/// `start_minutes`. Each entry contributes its proposed duration (or a
/// type-based default) and is dropped when it would cross `stop_minutes`;
/// an entry ending exactly at the stop is kept. Every entry is evaluated
/// against the current cursor, so a later short entry still fits after an
/// earlier long one was dropped.
pub fn correct_schedule(
    proposed: &[RawScheduleEntry],
    start_minutes: u32,
    stop_minutes: u32,
) -> Vec<CorrectedEntry> {
    let mut corrected = Vec::with_capacity(proposed.len());
    let mut cursor = start_minutes;
    let mut dropped = 0usize;

    for entry in proposed {
        let kind = kind_of(entry);
        let duration = entry_duration(entry, kind);

        if cursor + duration > stop_minutes {
            dropped += 1;
            continue;
        }

        corrected.push(CorrectedEntry {
            time_slot: slot_of(cursor, cursor + duration),
            task_id: entry.task_id.clone().unwrap_or_default(),
            kind,
            reason: entry.reason.clone(),
        });
        cursor += duration;
    }

    if dropped > 0 {
        log::warn!(
            "schedule correction dropped {} of {} proposed entries past the {} stop",
            dropped,
            proposed.len(),
            slot_of(stop_minutes, stop_minutes),
        );
    }

    corrected
}

fn kind_of(entry: &RawScheduleEntry) -> EntryKind {
    match entry.kind.as_deref() {
        Some("break") => EntryKind::Break,
        Some("focus") => EntryKind::Focus,
        _ => EntryKind::Regular,
    }
}

/// Duration of a proposed entry in minutes.
///
/// The proposed slot is honored only when it parses to a positive length;
/// absent, unparseable, zero, or negative slots fall back to the type
/// default rather than propagating a degenerate block.
fn entry_duration(entry: &RawScheduleEntry, kind: EntryKind) -> u32 {
    if let Some(ref slot) = entry.time_slot {
        if let Ok(minutes) = duration_minutes(slot) {
            if minutes > 0 {
                return minutes as u32;
            }
        }
    }
    match kind {
        EntryKind::Break => BREAK_DEFAULT_MINUTES,
        EntryKind::Focus => FOCUS_DEFAULT_MINUTES,
        EntryKind::Regular => REGULAR_DEFAULT_MINUTES,
    }
}
