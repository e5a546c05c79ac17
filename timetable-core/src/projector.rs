//! Projection of compacted spans onto weekly-recurring calendar events.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::{debug, error};

use crate::compact::{Span, compact_day};
use crate::constants::UID_DOMAIN;
use crate::dataset::{ClassEntry, Timetable, Weekday};
use crate::error::TimetableResult;
use crate::selection::Selection;
use crate::time_slot::{SlotTimes, split_label};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recurrence {
    Weekly,
}

impl Recurrence {
    /// Value of the RRULE property.
    pub fn as_rrule(&self) -> &'static str {
        match self {
            Recurrence::Weekly => "FREQ=WEEKLY",
        }
    }
}

/// One exported class meeting.
///
/// `start` and `end` hold the times exactly as written in the slot labels;
/// the afternoon-hour adjustment is applied when they are formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub uid: String,
    /// Course ID
    pub summary: String,
    /// Classroom
    pub location: String,
    /// Class type
    pub description: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub recurrence: Recurrence,
}

impl CalendarEvent {
    fn for_entry(
        entry: &ClassEntry,
        uid_key: String,
        date: NaiveDate,
        start: &str,
        end: &str,
    ) -> TimetableResult<Self> {
        let start_time = SlotTimes::parse(start)?.start;
        let end_time = SlotTimes::parse(end)?.end;

        Ok(CalendarEvent {
            uid: format!("{}-{}@{}", entry.course_id, uid_key, UID_DOMAIN),
            summary: entry.course_id.clone(),
            location: entry.classroom.clone(),
            description: entry.class_type.clone(),
            start: date.and_time(start_time),
            end: date.and_time(end_time),
            recurrence: Recurrence::Weekly,
        })
    }
}

/// Events for one span. Empty spans produce none, a merged single-course span
/// produces one covering all its slots, and a multi-entry slot produces one
/// event per entry.
fn project_span(span: &Span, slots: &[String], date: NaiveDate) -> TimetableResult<Vec<CalendarEvent>> {
    let first = span.first_slot(slots);

    if let Some(entry) = span.single() {
        let last = span.last_slot(slots);
        let (start_boundary, _) = split_label(first)?;
        let (_, end_boundary) = split_label(last)?;
        let uid_key = format!("{}-{}-{}", span.day, start_boundary, end_boundary);
        return Ok(vec![CalendarEvent::for_entry(entry, uid_key, date, first, last)?]);
    }

    span.entries
        .iter()
        .map(|entry| {
            let uid_key = format!("{}-{}", span.day, first);
            CalendarEvent::for_entry(entry, uid_key, date, first, first)
        })
        .collect()
}

/// Project the filtered week onto events anchored at `anchor_monday`, with
/// each weekday placed `index` days after it.
///
/// A span whose slot labels do not parse is skipped and logged; the rest of
/// the week is still projected.
pub fn project(
    timetable: &Timetable,
    selection: &Selection,
    slots: &[String],
    anchor_monday: NaiveDate,
) -> Vec<CalendarEvent> {
    let mut events = Vec::new();

    for day in Weekday::ALL {
        let date = anchor_monday + Duration::days(day.index() as i64);

        for span in compact_day(timetable, selection, day, slots) {
            match project_span(&span, slots, date) {
                Ok(mut span_events) => events.append(&mut span_events),
                Err(e) => {
                    error!(
                        day = %day,
                        slot = span.first_slot(slots),
                        error = %e,
                        "Skipping events for malformed slot"
                    );
                }
            }
        }
    }

    debug!(events = events.len(), anchor = %anchor_monday, "Projected calendar events");
    events
}
