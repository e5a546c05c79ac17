//! Core of the weekly class timetable.
//!
//! This crate holds everything below the user interface:
//! - `dataset` and `catalog` for the static course data
//! - `filter`, `compact` and `projector` for turning it into display spans
//!   and calendar events
//! - `selection` for the persisted set of chosen courses
//! - `ics` and `export` for writing calendar files and images

pub mod catalog;
pub mod color;
pub mod compact;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod error;
pub mod export;
pub mod filter;
pub mod ics;
pub mod projector;
pub mod selection;
pub mod time_slot;

pub use catalog::{Course, CourseCatalog};
pub use compact::{DayRow, Span, WeekView, compact_day};
pub use dataset::{ClassEntry, DaySchedule, Timetable, Weekday};
pub use error::{TimetableError, TimetableResult};
pub use filter::filter_entries;
pub use projector::{CalendarEvent, Recurrence, project};
pub use selection::{JsonFileStore, MemoryStore, Selection, SelectionPersistence, SelectionStore};
