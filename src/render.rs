// File: ./src/render.rs
// Plain-text rendering of the calendar view-model for the CLI.
use crate::calendar::{DayCell, Indicator, MonthGrid};
use crate::config::Config;
use crate::model::TimelineEvent;
use crate::timeline::{DateGroup, TimelineSummary};
use chrono::{Datelike, NaiveDate};
use std::fmt::{self, Write};

const WEEKDAY_HEADER: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
const CELL_WIDTH: usize = 4;

fn render_cell(cell: Option<&DayCell>) -> String {
    match cell {
        None => " ".repeat(CELL_WIDTH),
        Some(c) => {
            let marker = if c.is_today { '>' } else { ' ' };
            format!("{}{:>2}{}", marker, c.date.day(), c.indicator().symbol())
        }
    }
}

/// Seven 4-column cells per row, Sunday first. `>` marks today; the trailing
/// symbol is the day's indicator (see [`legend`]).
pub fn render_month(grid: &MonthGrid) -> Result<String, fmt::Error> {
    let width = CELL_WIDTH * 7;
    let mut out = String::new();
    writeln!(out, "{:^width$}", grid.title(), width = width)?;

    let header: String = WEEKDAY_HEADER.iter().map(|d| format!(" {} ", d)).collect();
    writeln!(out, "{}", header.trim_end())?;

    for week in grid.weeks() {
        let line: String = week.iter().map(|c| render_cell(*c)).collect();
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(out)
}

pub fn legend() -> String {
    format!(
        "{} deadline  {} reminder  {} other  > today",
        Indicator::Deadline.symbol(),
        Indicator::Reminder.symbol(),
        Indicator::Milestone.symbol()
    )
}

pub fn relative_label(days: i64) -> String {
    match days {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        -1 => "yesterday".to_string(),
        d if d > 1 => format!("in {} days", d),
        d => format!("{} days ago", -d),
    }
}

fn render_event_line(event: &TimelineEvent, config: &Config) -> Result<String, fmt::Error> {
    let mut line = String::new();
    write!(
        line,
        "  {} {:<9} {}  {}",
        event.checkbox_symbol(),
        event.event_type.as_str().to_uppercase(),
        event.date.format(&config.time_format),
        if event.title.is_empty() {
            "(untitled)"
        } else {
            event.title.as_str()
        }
    )?;
    if let Some(college) = &event.college {
        write!(line, " ({})", college)?;
    }
    if config.show_event_ids {
        write!(line, "  [{}]", event.id)?;
    }
    Ok(line)
}

pub fn render_agenda(
    groups: &[DateGroup],
    today: NaiveDate,
    config: &Config,
) -> Result<String, fmt::Error> {
    if groups.is_empty() {
        return Ok("No events match the current filters.\n".to_string());
    }

    let mut out = String::new();
    for group in groups {
        let Some(first) = group.events.first() else {
            continue;
        };
        writeln!(
            out,
            "{} ({})",
            group.date_key.format(&config.agenda_date_format),
            relative_label(first.days_until(today))
        )?;
        for event in &group.events {
            writeln!(out, "{}", render_event_line(event, config)?)?;
        }
    }
    Ok(out)
}

pub fn render_summary(summary: &TimelineSummary, config: &Config) -> String {
    format!(
        "{} events: {} pending, {} completed, {} overdue, {} in the next {} days\n",
        summary.total,
        summary.pending,
        summary.completed,
        summary.overdue,
        summary.upcoming,
        config.upcoming_days
    )
}
