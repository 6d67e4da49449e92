// File: ./src/model/event.rs
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::EnumIter;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Deadline,
    Reminder,
    Milestone,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Deadline => "deadline",
            EventType::Reminder => "reminder",
            EventType::Milestone => "milestone",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deadline" => Ok(EventType::Deadline),
            "reminder" => Ok(EventType::Reminder),
            "milestone" => Ok(EventType::Milestone),
            other => Err(format!("Unknown event type: {}", other)),
        }
    }
}

/// A dated entry on the application timeline.
///
/// `title`, `college` and `description` are display payload: nothing in this
/// crate reads them for filtering or ordering.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub id: String,
    #[serde(with = "event_date")]
    pub date: NaiveDateTime,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default)]
    pub completed: bool,

    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub college: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TimelineEvent {
    /// Creates a pending event with a freshly generated id.
    pub fn new(title: &str, date: NaiveDateTime, event_type: EventType) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            event_type,
            completed: false,
            title: title.to_string(),
            college: None,
            description: None,
        }
    }

    /// Calendar day used for grouping and grid lookup. Time of day is ignored.
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }

    pub fn is_pending(&self) -> bool {
        !self.completed
    }

    /// Returns a copy with the completion flag inverted.
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }

    /// Whole days from `today` until this event's day (negative when past).
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        (self.day() - today).num_days()
    }

    pub fn checkbox_symbol(&self) -> &'static str {
        if self.completed { "[✔]" } else { "[ ]" }
    }
}

/// Parses the date formats the dashboard API is known to emit.
///
/// Accepted, in order:
/// - RFC 3339 with an offset (`2026-03-05T09:00:00Z`), converted to local wall-clock time
/// - naive date-time with `T` or space separator, with or without seconds
/// - bare date (`2026-03-10`), read as midnight
pub fn parse_event_date(raw: &str) -> Option<NaiveDateTime> {
    let val = raw.trim();
    if val.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(val) {
        return Some(dt.with_timezone(&Local).naive_local());
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(val, fmt) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(val, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

mod event_date {
    use super::parse_event_date;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_event_date(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid event date: '{}'", raw)))
    }
}
