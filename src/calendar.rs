// File: ./src/calendar.rs
// Month grid construction for the timeline calendar.
//
// A grid covers exactly one month: one DayCell per calendar day, in ascending
// order. Alignment into a 7-column (Sunday-first) layout is described by
// `leading_blanks` rather than by placeholder cells.
use crate::model::filter::{first_of_month, last_of_month};
use crate::model::{EventType, TimelineEvent};
use chrono::{Datelike, Duration, Local, NaiveDate};
use std::collections::HashMap;

/// The single dot a day cell shows.
///
/// Precedence: an uncompleted deadline beats an uncompleted reminder, which
/// beats the generic marker drawn for any other event (completed ones included).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    None,
    Deadline,
    Reminder,
    Milestone,
}

impl Indicator {
    pub fn for_events<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a TimelineEvent>,
    {
        let mut any = false;
        let mut reminder = false;
        for event in events {
            any = true;
            if event.completed {
                continue;
            }
            match event.event_type {
                EventType::Deadline => return Indicator::Deadline,
                EventType::Reminder => reminder = true,
                EventType::Milestone => {}
            }
        }

        if reminder {
            Indicator::Reminder
        } else if any {
            Indicator::Milestone
        } else {
            Indicator::None
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Indicator::None => ' ',
            Indicator::Deadline => '!',
            Indicator::Reminder => '*',
            Indicator::Milestone => '.',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_current_month: bool,
    pub is_today: bool,
    pub has_deadline: bool,
    pub has_reminder: bool,
    pub has_milestone_only: bool,
    /// Events on this day, completed ones included.
    pub event_count: usize,
}

impl DayCell {
    fn new(date: NaiveDate, today: NaiveDate, day_events: &[&TimelineEvent]) -> Self {
        let indicator = Indicator::for_events(day_events.iter().copied());
        Self {
            date,
            in_current_month: true,
            is_today: date == today,
            has_deadline: indicator == Indicator::Deadline,
            has_reminder: indicator == Indicator::Reminder,
            has_milestone_only: indicator == Indicator::Milestone,
            event_count: day_events.len(),
        }
    }

    pub fn indicator(&self) -> Indicator {
        if self.has_deadline {
            Indicator::Deadline
        } else if self.has_reminder {
            Indicator::Reminder
        } else if self.has_milestone_only {
            Indicator::Milestone
        } else {
            Indicator::None
        }
    }

    pub fn has_events(&self) -> bool {
        self.event_count > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    /// First day of the rendered month.
    pub month: NaiveDate,
    /// Blank slots before day 1 in a Sunday-first week (0 = Sunday).
    pub leading_blanks: u32,
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    /// "March 2026"
    pub fn title(&self) -> String {
        self.month.format("%B %Y").to_string()
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell> {
        if date < self.month {
            return None;
        }
        let idx = (date - self.month).num_days() as usize;
        self.cells.get(idx).filter(|c| c.date == date)
    }

    /// Rows of seven slots, Sunday first. Slots before day 1 and after the last
    /// day are `None`.
    pub fn weeks(&self) -> Vec<[Option<&DayCell>; 7]> {
        let mut rows = Vec::new();
        let mut row: [Option<&DayCell>; 7] = [None; 7];
        let mut col = self.leading_blanks as usize;

        for cell in &self.cells {
            row[col] = Some(cell);
            col += 1;
            if col == 7 {
                rows.push(row);
                row = [None; 7];
                col = 0;
            }
        }
        if col > 0 {
            rows.push(row);
        }
        rows
    }
}

/// Events falling on `day`, in input order.
pub fn events_on(events: &[TimelineEvent], day: NaiveDate) -> Vec<&TimelineEvent> {
    events.iter().filter(|e| e.day() == day).collect()
}

/// Builds the grid for the month containing `month`, marking the current local day.
pub fn build_month_grid(events: &[TimelineEvent], month: NaiveDate) -> MonthGrid {
    build_month_grid_at(events, month, Local::now().date_naive())
}

/// Same as [`build_month_grid`] with an explicit `today`.
pub fn build_month_grid_at(
    events: &[TimelineEvent],
    month: NaiveDate,
    today: NaiveDate,
) -> MonthGrid {
    let first = first_of_month(month);
    let last = last_of_month(month);

    // Bucket once instead of scanning the list per day.
    let mut by_day: HashMap<NaiveDate, Vec<&TimelineEvent>> = HashMap::new();
    for event in events {
        let day = event.day();
        if day >= first && day <= last {
            by_day.entry(day).or_default().push(event);
        }
    }

    let mut cells = Vec::with_capacity((last - first).num_days() as usize + 1);
    let mut day = first;
    while day <= last {
        let day_events = by_day.get(&day).map(Vec::as_slice).unwrap_or(&[]);
        cells.push(DayCell::new(day, today, day_events));
        day += Duration::days(1);
    }

    log::debug!(
        "Built grid for {}: {} days, {} with events",
        first.format("%Y-%m"),
        cells.len(),
        by_day.len()
    );

    MonthGrid {
        month: first,
        leading_blanks: first.weekday().num_days_from_sunday(),
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: &str, date: &str, event_type: EventType, completed: bool) -> TimelineEvent {
        TimelineEvent {
            id: id.to_string(),
            date: crate::model::parse_event_date(date).unwrap(),
            event_type,
            completed,
            title: String::new(),
            college: None,
            description: None,
        }
    }

    #[test]
    fn test_indicator_precedence() {
        let deadline = event("d", "2026-03-05", EventType::Deadline, false);
        let reminder = event("r", "2026-03-05", EventType::Reminder, false);
        let milestone = event("m", "2026-03-05", EventType::Milestone, false);
        let done_deadline = event("dd", "2026-03-05", EventType::Deadline, true);

        assert_eq!(Indicator::for_events([&reminder, &deadline]), Indicator::Deadline);
        assert_eq!(Indicator::for_events([&milestone, &reminder]), Indicator::Reminder);
        assert_eq!(Indicator::for_events([&milestone]), Indicator::Milestone);
        assert_eq!(
            Indicator::for_events([&done_deadline, &reminder]),
            Indicator::Reminder
        );
        assert_eq!(Indicator::for_events([&done_deadline]), Indicator::Milestone);
        assert_eq!(
            Indicator::for_events(std::iter::empty::<&TimelineEvent>()),
            Indicator::None
        );
    }

    #[test]
    fn test_weeks_pad_both_ends() {
        // April 2026 starts on a Wednesday and has 30 days.
        let april = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
        let grid = build_month_grid_at(&[], april, april);
        let weeks = grid.weeks();

        assert_eq!(weeks.len(), 5);
        assert!(weeks[0][..3].iter().all(Option::is_none));
        assert_eq!(weeks[0][3].map(|c| c.date), Some(april));
        assert_eq!(
            weeks[4][4].map(|c| c.date),
            NaiveDate::from_ymd_opt(2026, 4, 30)
        );
        assert!(weeks[4][5].is_none());
    }

    #[test]
    fn test_cell_lookup() {
        let march = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let grid = build_month_grid_at(&[], march, march);
        let d = NaiveDate::from_ymd_opt(2026, 3, 17).unwrap();
        assert_eq!(grid.cell(d).map(|c| c.date), Some(d));
        assert!(grid.cell(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()).is_none());
        assert!(grid.cell(NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()).is_none());
    }
}
