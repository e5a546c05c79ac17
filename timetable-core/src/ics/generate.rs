//! ICS file generation.

use crate::constants::ICS_VERSION;
use crate::projector::CalendarEvent;
use crate::time_slot::format_ical_datetime;
use icalendar::{Calendar, Component, EventLike};

/// Generate a complete .ics document with one VEVENT per event.
///
/// Times are written as floating local times (no `Z`, no TZID).
pub fn generate_ics(events: &[CalendarEvent], prod_id: &str) -> String {
    let mut cal = Calendar::new();

    for event in events {
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&event.uid);
        ics_event.summary(&event.summary);

        ics_event.add_property("DTSTART", format_ical_datetime(&event.start));
        ics_event.add_property("DTEND", format_ical_datetime(&event.end));

        ics_event.location(&event.location);
        ics_event.description(&event.description);

        ics_event.add_property("RRULE", event.recurrence.as_rrule());

        cal.push(ics_event.done());
    }

    let cal = cal.done();

    normalize_ics(&cal.to_string(), prod_id)
}

/// VEVENT property order in the exported file. Anything else follows.
const EVENT_PROPERTY_ORDER: [&str; 7] = [
    "UID",
    "SUMMARY",
    "DTSTART",
    "DTEND",
    "LOCATION",
    "DESCRIPTION",
    "RRULE",
];

fn property_rank(property: &str) -> usize {
    let name = property
        .split([':', ';'])
        .next()
        .unwrap_or_default();
    EVENT_PROPERTY_ORDER
        .iter()
        .position(|p| *p == name)
        .unwrap_or(EVENT_PROPERTY_ORDER.len())
}

/// Rewrite the icalendar crate's output into the exported form
/// - Header is exactly BEGIN:VCALENDAR, VERSION, PRODID
/// - Remove CALSCALE:GREGORIAN (it's the default)
/// - Remove DTSTAMP (generated from the clock; output must depend only on the events)
/// - VEVENT properties follow EVENT_PROPERTY_ORDER (the crate sorts them by name)
/// - Every line ends in CRLF
fn normalize_ics(ics: &str, prod_id: &str) -> String {
    let mut result = String::with_capacity(ics.len());
    // Properties of the open VEVENT, each with its folded continuation lines.
    let mut event: Option<Vec<String>> = None;

    for line in ics.lines() {
        if line.starts_with("VERSION:")
            || line.starts_with("PRODID:")
            || line.starts_with("DTSTAMP:")
            || line == "CALSCALE:GREGORIAN"
        {
            continue;
        }

        if let Some(properties) = event.as_mut() {
            if line == "END:VEVENT" {
                properties.sort_by_key(|p| property_rank(p));
                for property in properties.iter() {
                    result.push_str(property);
                }
                event = None;
            } else if line.starts_with([' ', '\t']) {
                if let Some(last) = properties.last_mut() {
                    last.push_str(line);
                    last.push_str("\r\n");
                }
                continue;
            } else {
                properties.push(format!("{line}\r\n"));
                continue;
            }
        }

        result.push_str(line);
        result.push_str("\r\n");

        match line {
            "BEGIN:VCALENDAR" => {
                result.push_str(&format!("VERSION:{ICS_VERSION}\r\n"));
                result.push_str(&format!("PRODID:{prod_id}\r\n"));
            }
            "BEGIN:VEVENT" => event = Some(Vec::new()),
            _ => {}
        }
    }

    result
}
