// File: ./src/timeline.rs
// Filtered, day-grouped agenda and the completion toggle.
use crate::model::{StatusFilter, TimelineEvent, TypeFilter};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateGroup {
    pub date_key: NaiveDate,
    pub events: Vec<TimelineEvent>,
}

impl DateGroup {
    /// "2026-03-05"
    pub fn key_string(&self) -> String {
        self.date_key.format("%Y-%m-%d").to_string()
    }

    pub fn pending_count(&self) -> usize {
        self.events.iter().filter(|e| e.is_pending()).count()
    }
}

/// Filters `events`, sorts them by full date-time and groups them per day.
///
/// The sort is stable, so events sharing a timestamp keep their input order.
/// Groups come out in ascending day order.
pub fn build_visible_groups(
    events: &[TimelineEvent],
    status_filter: StatusFilter,
    type_filter: TypeFilter,
) -> Vec<DateGroup> {
    let mut visible: Vec<&TimelineEvent> = events
        .iter()
        .filter(|e| status_filter.matches(e) && type_filter.matches(e))
        .collect();
    visible.sort_by_key(|e| e.date);

    let mut groups: Vec<DateGroup> = Vec::new();
    for event in visible {
        let key = event.day();
        match groups.last_mut() {
            Some(group) if group.date_key == key => group.events.push(event.clone()),
            _ => groups.push(DateGroup {
                date_key: key,
                events: vec![event.clone()],
            }),
        }
    }

    log::debug!(
        "Visible groups (status={}, type={}): {} groups from {} events",
        status_filter,
        type_filter,
        groups.len(),
        events.len()
    );
    groups
}

/// Returns a copy of `events` with the completion flag of `id` inverted.
///
/// An unknown id yields an unchanged copy: callers only toggle ids they were
/// shown, so a miss means the caller holds a stale list.
pub fn toggle_completion(events: &[TimelineEvent], id: &str) -> Vec<TimelineEvent> {
    let mut found = false;
    let toggled = events
        .iter()
        .map(|e| {
            if !found && e.id == id {
                found = true;
                e.toggled()
            } else {
                e.clone()
            }
        })
        .collect();

    if !found {
        log::debug!("toggle_completion: no event with id '{}'", id);
    }
    toggled
}

/// Header counters for the timeline page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimelineSummary {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
    /// Pending and dated before `today`.
    pub overdue: usize,
    /// Pending and dated from `today` through `today + horizon` inclusive.
    pub upcoming: usize,
}

impl TimelineSummary {
    pub fn compute(events: &[TimelineEvent], today: NaiveDate, horizon_days: u32) -> Self {
        let mut summary = Self {
            total: events.len(),
            ..Self::default()
        };

        for event in events {
            if event.completed {
                summary.completed += 1;
                continue;
            }
            summary.pending += 1;
            let days = event.days_until(today);
            if days < 0 {
                summary.overdue += 1;
            } else if days <= horizon_days as i64 {
                summary.upcoming += 1;
            }
        }
        summary
    }
}
