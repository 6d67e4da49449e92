// File: ./src/view_model.rs
//! Everything the timeline page renders for one [`ViewState`].
//!
//! The grid is always built from the unfiltered list so the calendar keeps its
//! dots while the agenda beside it is narrowed by the filters. The agenda is
//! not limited to the visible month.
use crate::calendar::{MonthGrid, build_month_grid_at};
use crate::model::{TimelineEvent, ViewState};
use crate::timeline::{DateGroup, build_visible_groups};
use chrono::{Local, NaiveDate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarViewModel {
    pub state: ViewState,
    pub grid: MonthGrid,
    pub groups: Vec<DateGroup>,
}

impl CalendarViewModel {
    pub fn build(events: &[TimelineEvent], state: &ViewState) -> Self {
        Self::build_at(events, state, Local::now().date_naive())
    }

    pub fn build_at(events: &[TimelineEvent], state: &ViewState, today: NaiveDate) -> Self {
        let grid = build_month_grid_at(events, state.current_month, today);
        let groups = build_visible_groups(events, state.status_filter, state.type_filter);
        Self {
            state: *state,
            grid,
            groups,
        }
    }

    /// Groups whose day lies inside the visible month.
    pub fn groups_in_month(&self) -> impl Iterator<Item = &DateGroup> {
        self.groups
            .iter()
            .filter(|g| self.state.contains(g.date_key))
    }

    pub fn visible_event_count(&self) -> usize {
        self.groups.iter().map(|g| g.events.len()).sum()
    }
}
