// Crate root library declaration and module exports.
//
// The view-model core (`calendar`, `timeline`, `view_model`) is pure and
// synchronous; `config`, `context` and `storage` carry the filesystem side.
pub mod calendar;
pub mod cli;
pub mod config;
pub mod context;
pub mod model;
pub mod render;
pub mod storage;
pub mod timeline;
pub mod view_model;

pub use calendar::{DayCell, Indicator, MonthGrid, build_month_grid};
pub use model::{EventType, StatusFilter, TimelineEvent, TypeFilter, ViewState};
pub use timeline::{DateGroup, build_visible_groups, toggle_completion};
pub use view_model::CalendarViewModel;
