// Tests for config persistence and the local event store.
use admitline::config::Config;
use admitline::context::{AppContext, TestContext};
use admitline::model::{EventType, StatusFilter, TimelineEvent, TypeFilter, parse_event_date};
use admitline::storage::{EventStorage, ImportReport};
use admitline::timeline::toggle_completion;
use std::fs;

fn event(id: &str, date: &str, event_type: EventType) -> TimelineEvent {
    TimelineEvent {
        id: id.to_string(),
        date: parse_event_date(date).unwrap(),
        event_type,
        completed: false,
        title: format!("Event {}", id),
        college: Some("North College".to_string()),
        description: Some("Upload transcript".to_string()),
    }
}

#[test]
fn test_missing_config_falls_back_to_defaults() {
    let ctx = TestContext::new();
    let err = Config::load(&ctx).unwrap_err();
    assert!(Config::is_missing_config_error(&err));
    assert_eq!(Config::load_or_default(&ctx).unwrap(), Config::default());
}

#[test]
fn test_config_round_trip() {
    let ctx = TestContext::new();
    let config = Config {
        default_status_filter: StatusFilter::Pending,
        default_type_filter: TypeFilter::Reminder,
        upcoming_days: 14,
        show_event_ids: true,
        ..Config::default()
    };
    config.save(&ctx).unwrap();

    let text = fs::read_to_string(ctx.get_config_file_path().unwrap()).unwrap();
    assert!(text.contains("default_status_filter = \"pending\""));
    assert_eq!(Config::load(&ctx).unwrap(), config);
}

#[test]
fn test_partial_config_uses_serde_defaults() {
    let ctx = TestContext::new();
    fs::write(
        ctx.get_config_file_path().unwrap(),
        "default_type_filter = \"deadline\"\n",
    )
    .unwrap();

    let config = Config::load(&ctx).unwrap();
    assert_eq!(config.default_type_filter, TypeFilter::Deadline);
    assert_eq!(config.default_status_filter, StatusFilter::All);
    assert_eq!(config.upcoming_days, 7);
    assert_eq!(config.time_format, "%H:%M");
}

#[test]
fn test_bad_config_is_not_treated_as_missing() {
    let ctx = TestContext::new();
    let path = ctx.get_config_file_path().unwrap();

    fs::write(&path, "default_status_filter = \"urgent\"\n").unwrap();
    let err = Config::load(&ctx).unwrap_err();
    assert!(!Config::is_missing_config_error(&err));
    assert!(Config::load_or_default(&ctx).is_err());

    fs::write(&path, "time_format = \"%H:%M %\"\n").unwrap();
    let err = Config::load(&ctx).unwrap_err();
    assert!(err.to_string().contains("time_format"));
}

#[test]
fn test_store_starts_empty_and_round_trips() {
    let ctx = TestContext::new();
    assert!(EventStorage::load(&ctx).unwrap().is_empty());

    let events = vec![
        event("1", "2026-03-05T09:00", EventType::Deadline),
        event("2", "2026-03-10", EventType::Milestone),
    ];
    EventStorage::save(&ctx, &events).unwrap();
    assert_eq!(EventStorage::load(&ctx).unwrap(), events);

    let toggled = toggle_completion(&events, "2");
    EventStorage::save(&ctx, &toggled).unwrap();
    let reloaded = EventStorage::load(&ctx).unwrap();
    assert!(reloaded[1].completed);
    assert!(!reloaded[0].completed);
}

#[test]
fn test_unversioned_file_is_migrated() {
    let ctx = TestContext::new();
    let path = ctx.get_events_path().unwrap();
    fs::write(
        &path,
        r#"[{"id":"a","date":"2026-03-05T09:00:00Z","type":"deadline","completed":true}]"#,
    )
    .unwrap();

    let events = EventStorage::load(&ctx).unwrap();
    assert_eq!(events.len(), 1);
    assert!(events[0].completed);

    let upgraded = fs::read_to_string(&path).unwrap();
    assert!(upgraded.contains("\"version\": 1"));
}

#[test]
fn test_newer_version_is_rejected() {
    let ctx = TestContext::new();
    fs::write(
        ctx.get_events_path().unwrap(),
        r#"{"version": 99, "events": []}"#,
    )
    .unwrap();
    let err = EventStorage::load(&ctx).unwrap_err();
    assert!(err.to_string().contains("newer than supported"));
}

#[test]
fn test_import_merges_by_id() {
    let ctx = TestContext::new();
    EventStorage::save(&ctx, &[event("1", "2026-03-05T09:00", EventType::Deadline)]).unwrap();

    let dump = r#"[
        {"id": "1", "date": "2026-03-06T09:00", "type": "deadline", "title": "Moved"},
        {"id": "2", "date": "2026-03-07", "type": "reminder", "title": "Ask for letter"}
    ]"#;
    let report = EventStorage::import_from_json(&ctx, dump).unwrap();
    assert_eq!(report, ImportReport { added: 1, updated: 1 });

    let stored = EventStorage::load(&ctx).unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].title, "Moved");
    assert_eq!(stored[0].college, None);
    assert_eq!(stored[1].event_type, EventType::Reminder);
}

#[test]
fn test_import_rejects_empty_or_invalid_data() {
    let ctx = TestContext::new();
    assert!(EventStorage::import_from_json(&ctx, "[]").is_err());
    assert!(EventStorage::import_from_json(&ctx, "not json").is_err());
    assert!(
        EventStorage::import_from_json(&ctx, r#"[{"id":"1","date":"someday","type":"deadline"}]"#)
            .is_err()
    );
    assert!(EventStorage::load(&ctx).unwrap().is_empty());
}

#[test]
fn test_format_without_matching_fields_is_rejected() {
    let ctx = TestContext::new();
    let path = ctx.get_config_file_path().unwrap();

    // Naive event times carry no offset.
    fs::write(&path, "time_format = \"%H:%M %z\"\n").unwrap();
    let err = Config::load(&ctx).unwrap_err();
    assert!(err.to_string().contains("time_format"));

    // Agenda headings format a bare date.
    fs::write(&path, "agenda_date_format = \"%H:%M\"\n").unwrap();
    let err = Config::load(&ctx).unwrap_err();
    assert!(err.to_string().contains("agenda_date_format"));
    assert!(!Config::is_missing_config_error(&err));

    fs::write(&path, "agenda_date_format = \"%d.%m.%Y\"\ntime_format = \"%I:%M %p\"\n").unwrap();
    let config = Config::load(&ctx).unwrap();
    assert_eq!(config.agenda_date_format, "%d.%m.%Y");
}

#[test]
fn test_modify_persists_and_returns_closure_value() {
    let ctx = TestContext::new();
    EventStorage::save(&ctx, &[event("1", "2026-03-05T09:00", EventType::Deadline)]).unwrap();

    let count = EventStorage::modify(&ctx, |events| {
        *events = toggle_completion(events, "1");
        events.push(event("2", "2026-03-06", EventType::Reminder));
        events.len()
    })
    .unwrap();
    assert_eq!(count, 2);

    let stored = EventStorage::load(&ctx).unwrap();
    assert!(stored[0].completed);
    assert_eq!(stored[1].id, "2");
}
