//! Fixed-event filtering.

use chrono::{Datelike, NaiveDate};

use crate::types::FixedEvent;

/// Return the fixed events active on `date`.
///
/// An event qualifies when it is active and its `days_of_week` contains the
/// civil day-of-week of `date` (0 = Sunday … 6 = Saturday). No timezone
/// normalization happens here; the caller decides what calendar day is
/// being planned.
pub fn active_events_on(date: NaiveDate, events: &[FixedEvent]) -> Vec<FixedEvent> {
    let day = date.weekday().num_days_from_sunday() as u8;
    events
        .iter()
        .filter(|e| e.is_active && e.days_of_week.contains(&day))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EventCategory;

    fn event(title: &str, days: &[u8]) -> FixedEvent {
        FixedEvent {
            id: title.to_lowercase(),
            title: title.to_string(),
            start_time: "12:00".to_string(),
            end_time: "13:00".to_string(),
            days_of_week: days.to_vec(),
            category: EventCategory::Meal,
            is_active: true,
            description: None,
        }
    }

    #[test]
    fn weekday_events_match_a_tuesday() {
        // 2025-03-04 is a Tuesday (day 2).
        let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        let events = vec![event("Lunch", &[1, 2, 3, 4, 5]), event("Brunch", &[0, 6])];

        let active = active_events_on(date, &events);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].title, "Lunch");
    }

    #[test]
    fn inactive_events_are_skipped() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        let mut lunch = event("Lunch", &[2]);
        lunch.is_active = false;

        assert!(active_events_on(date, &[lunch]).is_empty());
    }

    #[test]
    fn sunday_is_day_zero() {
        // 2025-03-02 is a Sunday.
        let date = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let events = vec![event("Brunch", &[0]), event("Standup", &[1, 2, 3, 4, 5])];

        let active = active_events_on(date, &events);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].title, "Brunch");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        assert!(active_events_on(date, &[]).is_empty());
    }
}
