//! Time slot labels and the date/time formatting used for calendar export.
//!
//! Slot labels have the fixed form `H:MM-H:MM` with no AM/PM marker. The
//! institution's teaching day runs 8:00 to 20:00, so an hour below 8 in a
//! label is an afternoon hour written on a 12-hour clock.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::constants::DAY_START_HOUR;
use crate::error::{TimetableError, TimetableResult};

/// A parsed `H:MM-H:MM` slot label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotTimes {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl SlotTimes {
    pub fn parse(label: &str) -> TimetableResult<Self> {
        let (start, end) = split_label(label)?;
        Ok(SlotTimes {
            start: parse_boundary(start, label)?,
            end: parse_boundary(end, label)?,
        })
    }
}

/// Split a slot label into its start and end boundary strings.
pub fn split_label(label: &str) -> TimetableResult<(&str, &str)> {
    label
        .split_once('-')
        .ok_or_else(|| TimetableError::MalformedSlotLabel(label.to_string()))
}

/// Parse one `H:MM` boundary. `label` is only used for the error message.
fn parse_boundary(boundary: &str, label: &str) -> TimetableResult<NaiveTime> {
    let malformed = || TimetableError::MalformedSlotLabel(label.to_string());

    let (hour, minute) = boundary.split_once(':').ok_or_else(malformed)?;
    if hour.is_empty() || minute.is_empty() {
        return Err(malformed());
    }
    if !hour.chars().chain(minute.chars()).all(|c| c.is_ascii_digit()) {
        return Err(malformed());
    }

    let hour: u32 = hour.parse().map_err(|_| malformed())?;
    let minute: u32 = minute.parse().map_err(|_| malformed())?;

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(malformed)
}

/// Hour as written to the calendar file.
///
/// Labels carry no AM/PM field, so hours below 8 are shifted by 12
/// (`7:30` is 19:30). Existing exports depend on this exact rule.
pub fn display_hour(hour: u32) -> u32 {
    if hour < DAY_START_HOUR { hour + 12 } else { hour }
}

/// Format a naive local datetime as `YYYYMMDDTHHMMSS` with the display hour
/// applied and seconds always `00`.
pub fn format_ical_datetime(dt: &NaiveDateTime) -> String {
    format!(
        "{}T{:02}{:02}00",
        dt.date().format("%Y%m%d"),
        display_hour(dt.hour()),
        dt.minute()
    )
}

/// The Monday that anchors exported events: today if today is Monday,
/// otherwise the next upcoming one.
pub fn next_monday(today: NaiveDate) -> NaiveDate {
    let offset = (7 - today.weekday().num_days_from_monday()) % 7;
    today + Duration::days(i64::from(offset))
}

/// Column header text for a slot: its start time, with `:00` dropped.
pub fn slot_header(label: &str) -> &str {
    let start = label.split('-').next().unwrap_or(label);
    start.strip_suffix(":00").unwrap_or(start)
}
