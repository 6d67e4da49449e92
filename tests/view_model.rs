// Tests for the combined calendar view-model and summary counters.
use admitline::CalendarViewModel;
use admitline::config::Config;
use admitline::model::{EventType, StatusFilter, TimelineEvent, TypeFilter, ViewState, parse_event_date};
use admitline::timeline::{TimelineSummary, toggle_completion};
use chrono::{Datelike, NaiveDate};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn event(id: &str, date: &str, event_type: EventType, completed: bool) -> TimelineEvent {
    TimelineEvent {
        id: id.to_string(),
        date: parse_event_date(date).unwrap(),
        event_type,
        completed,
        title: format!("Event {}", id),
        college: None,
        description: None,
    }
}

fn events() -> Vec<TimelineEvent> {
    vec![
        event("1", "2026-03-05T09:00", EventType::Deadline, false),
        event("2", "2026-03-05T10:00", EventType::Reminder, false),
        event("3", "2026-03-10", EventType::Milestone, true),
        event("4", "2026-04-01T12:00", EventType::Deadline, false),
    ]
}

#[test]
fn test_grid_ignores_filters_groups_respect_them() {
    let state = ViewState::new(ymd(2026, 3, 20), StatusFilter::Pending, TypeFilter::Reminder);
    let view = CalendarViewModel::build_at(&events(), &state, ymd(2026, 3, 5));

    assert_eq!(view.grid.month, ymd(2026, 3, 1));
    assert!(view.grid.cell(ymd(2026, 3, 5)).unwrap().has_deadline);
    assert!(view.grid.cell(ymd(2026, 3, 5)).unwrap().is_today);
    assert!(view.grid.cell(ymd(2026, 3, 10)).unwrap().has_milestone_only);

    assert_eq!(view.groups.len(), 1);
    assert_eq!(view.groups[0].events[0].id, "2");
    assert_eq!(view.visible_event_count(), 1);
}

#[test]
fn test_groups_in_month_narrows_to_visible_month() {
    let state = ViewState::new(ymd(2026, 3, 1), StatusFilter::All, TypeFilter::All);
    let view = CalendarViewModel::build_at(&events(), &state, ymd(2026, 3, 1));

    assert_eq!(view.groups.len(), 3);
    let in_month: Vec<NaiveDate> = view.groups_in_month().map(|g| g.date_key).collect();
    assert_eq!(in_month, vec![ymd(2026, 3, 5), ymd(2026, 3, 10)]);

    let next = CalendarViewModel::build_at(&events(), &state.next_month(), ymd(2026, 3, 1));
    let in_april: Vec<NaiveDate> = next.groups_in_month().map(|g| g.date_key).collect();
    assert_eq!(in_april, vec![ymd(2026, 4, 1)]);
}

#[test]
fn test_toggle_then_rebuild_moves_indicator() {
    let state = ViewState::new(ymd(2026, 3, 1), StatusFilter::Pending, TypeFilter::All);
    let toggled = toggle_completion(&events(), "1");
    let view = CalendarViewModel::build_at(&toggled, &state, ymd(2026, 3, 1));

    let march5 = view.grid.cell(ymd(2026, 3, 5)).unwrap();
    assert!(!march5.has_deadline);
    assert!(march5.has_reminder);
    assert_eq!(view.groups[0].events.len(), 1);
    assert_eq!(view.groups[0].events[0].id, "2");
}

#[test]
fn test_initial_view_state_from_config() {
    let config = Config {
        default_status_filter: StatusFilter::Pending,
        default_type_filter: TypeFilter::Deadline,
        ..Config::default()
    };
    let state = config.initial_view_state(ymd(2026, 10, 18));
    assert_eq!(state.current_month, ymd(2026, 10, 1));
    assert_eq!(state.status_filter, StatusFilter::Pending);
    assert_eq!(state.type_filter, TypeFilter::Deadline);
}

#[test]
fn test_summary_on_fixed_day() {
    let summary = TimelineSummary::compute(&events(), ymd(2026, 3, 6), 30);
    assert_eq!(summary.total, 4);
    assert_eq!(summary.completed, 1);
    assert_eq!(summary.pending, 3);
    assert_eq!(summary.overdue, 2);
    assert_eq!(summary.upcoming, 1);
}

#[test]
fn test_view_state_helpers_keep_other_fields() {
    let state = ViewState::new(ymd(2026, 3, 20), StatusFilter::All, TypeFilter::All)
        .with_status(StatusFilter::Completed)
        .with_type(TypeFilter::Milestone);
    let view = CalendarViewModel::build_at(&events(), &state, ymd(2026, 3, 1));

    assert_eq!(view.grid.title(), "March 2026");
    assert_eq!(view.groups.len(), 1);
    assert_eq!(view.groups[0].key_string(), "2026-03-10");
    assert_eq!(view.groups[0].pending_count(), 0);
    assert_eq!(view.groups[0].events[0].days_until(ymd(2026, 3, 1)), 9);

    let today_state = ViewState::for_today(StatusFilter::Pending, TypeFilter::All);
    assert_eq!(today_state.current_month.day(), 1);
    assert_eq!(today_state.status_filter, StatusFilter::Pending);
}
