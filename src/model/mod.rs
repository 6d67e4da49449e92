// File: ./src/model/mod.rs
pub mod event;
pub mod filter;

pub use event::{EventType, TimelineEvent, parse_event_date};
pub use filter::{StatusFilter, TypeFilter, ViewState};
