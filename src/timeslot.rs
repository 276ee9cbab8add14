//! Minute-level time arithmetic over a single civil day.
//!
//! The planner works entirely in minutes since midnight; slots never wrap
//! past 24:00 because the corrector walks forward from a same-day start and
//! drops anything that would cross the stop boundary.

use crate::error::PlanError;

/// Parse `"HH:mm"` into minutes since midnight.
///
/// Exactly two colon-separated integers, hour 0–23, minute 0–59.
pub fn minutes_of(hhmm: &str) -> Result<u32, PlanError> {
    let malformed = || PlanError::MalformedTime(hhmm.to_string());

    let mut parts = hhmm.split(':');
    let hour: u32 = parts
        .next()
        .and_then(|p| p.trim().parse().ok())
        .ok_or_else(malformed)?;
    let minute: u32 = parts
        .next()
        .and_then(|p| p.trim().parse().ok())
        .ok_or_else(malformed)?;
    if parts.next().is_some() || hour > 23 || minute > 59 {
        return Err(malformed());
    }
    Ok(hour * 60 + minute)
}

/// Render minutes since midnight as zero-padded `"HH:mm"`.
pub fn hhmm_of(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Render a half-open interval as `"HH:mm-HH:mm"`.
pub fn slot_of(start_minutes: u32, end_minutes: u32) -> String {
    format!("{}-{}", hhmm_of(start_minutes), hhmm_of(end_minutes))
}

/// Duration in minutes of a `"HH:mm-HH:mm"` slot.
///
/// Negative when end precedes start; callers must validate before use.
pub fn duration_minutes(slot: &str) -> Result<i64, PlanError> {
    let malformed = || PlanError::MalformedTime(slot.to_string());

    let mut parts = slot.split('-');
    let start = parts.next().ok_or_else(malformed)?;
    let end = parts.next().ok_or_else(malformed)?;
    if parts.next().is_some() {
        return Err(malformed());
    }
    Ok(minutes_of(end.trim())? as i64 - minutes_of(start.trim())? as i64)
}
