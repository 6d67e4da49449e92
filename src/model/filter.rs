// File: ./src/model/filter.rs
// Status/type filters and the month-navigation view state.
use crate::model::event::{EventType, TimelineEvent};
use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::EnumIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    pub fn matches(&self, event: &TimelineEvent) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => !event.completed,
            StatusFilter::Completed => event.completed,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Pending => write!(f, "pending"),
            StatusFilter::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "pending" => Ok(StatusFilter::Pending),
            "completed" | "done" => Ok(StatusFilter::Completed),
            other => Err(format!("Unknown status filter: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Deadline,
    Reminder,
    Milestone,
}

impl TypeFilter {
    pub fn matches(&self, event: &TimelineEvent) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Deadline => event.event_type == EventType::Deadline,
            TypeFilter::Reminder => event.event_type == EventType::Reminder,
            TypeFilter::Milestone => event.event_type == EventType::Milestone,
        }
    }
}

impl From<EventType> for TypeFilter {
    fn from(event_type: EventType) -> Self {
        match event_type {
            EventType::Deadline => TypeFilter::Deadline,
            EventType::Reminder => TypeFilter::Reminder,
            EventType::Milestone => TypeFilter::Milestone,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => write!(f, "all"),
            TypeFilter::Deadline => write!(f, "deadline"),
            TypeFilter::Reminder => write!(f, "reminder"),
            TypeFilter::Milestone => write!(f, "milestone"),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(TypeFilter::All);
        }
        s.parse::<EventType>()
            .map(TypeFilter::from)
            .map_err(|_| format!("Unknown type filter: {}", s.trim()))
    }
}

// --- MONTH ARITHMETIC ---

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    first + Duration::days(days_in_month(first.year(), first.month()) as i64 - 1)
}

/// What the timeline page is currently showing.
///
/// `current_month` is always stored as the first day of the month; only its
/// year and month are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub current_month: NaiveDate,
    #[serde(default)]
    pub status_filter: StatusFilter,
    #[serde(default)]
    pub type_filter: TypeFilter,
}

impl ViewState {
    pub fn new(month: NaiveDate, status_filter: StatusFilter, type_filter: TypeFilter) -> Self {
        Self {
            current_month: first_of_month(month),
            status_filter,
            type_filter,
        }
    }

    pub fn for_today(status_filter: StatusFilter, type_filter: TypeFilter) -> Self {
        Self::new(Local::now().date_naive(), status_filter, type_filter)
    }

    pub fn next_month(&self) -> Self {
        Self {
            current_month: last_of_month(self.current_month) + Duration::days(1),
            ..*self
        }
    }

    pub fn prev_month(&self) -> Self {
        Self {
            current_month: first_of_month(self.current_month - Duration::days(1)),
            ..*self
        }
    }

    pub fn with_status(&self, status_filter: StatusFilter) -> Self {
        Self {
            status_filter,
            ..*self
        }
    }

    pub fn with_type(&self, type_filter: TypeFilter) -> Self {
        Self {
            type_filter,
            ..*self
        }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        day.year() == self.current_month.year() && day.month() == self.current_month.month()
    }
}
