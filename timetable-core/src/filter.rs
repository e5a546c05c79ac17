//! Narrowing slot entries to the selected courses.

use crate::dataset::{ClassEntry, Timetable, Weekday};
use crate::error::TimetableResult;
use crate::selection::Selection;

/// Entries for `(day, slot)` whose course is selected, in dataset order.
///
/// An empty selection shows every entry. Fails only when `day` is not a
/// weekday name.
pub fn filter_entries<'a>(
    timetable: &'a Timetable,
    selection: &Selection,
    day: &str,
    slot: &str,
) -> TimetableResult<Vec<&'a ClassEntry>> {
    let day: Weekday = day.parse()?;
    Ok(filtered(timetable, selection, day, slot))
}

pub(crate) fn filtered<'a>(
    timetable: &'a Timetable,
    selection: &Selection,
    day: Weekday,
    slot: &str,
) -> Vec<&'a ClassEntry> {
    let entries = timetable.entries(day, slot);
    if selection.is_empty() {
        return entries.iter().collect();
    }
    entries
        .iter()
        .filter(|entry| selection.contains(&entry.course_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DaySchedule;
    use crate::error::TimetableError;

    fn timetable() -> Timetable {
        let slot = vec![
            ClassEntry::new("MATH101", "Room A", "class"),
            ClassEntry::new("PHYS201", "Lab 2", "lab"),
            ClassEntry::new("CHEM110", "Room C", "tutorial"),
        ];
        Timetable::from_days([(Weekday::Monday, DaySchedule::new().with_slot("9:00-9:30", slot))])
            .unwrap()
    }

    #[test]
    fn test_empty_selection_passes_everything_through() {
        let timetable = timetable();
        for day in Weekday::ALL {
            for slot in timetable.ordered_slots() {
                let filtered =
                    filter_entries(&timetable, &Selection::new(), day.as_str(), slot).unwrap();
                let expected: Vec<_> = timetable.entries(day, slot).iter().collect();
                assert_eq!(filtered, expected);
            }
        }
    }

    #[test]
    fn test_selection_keeps_relative_order() {
        let timetable = timetable();
        let selection = Selection::from_ids(["CHEM110", "MATH101"]);
        let ids: Vec<_> = filter_entries(&timetable, &selection, "Monday", "9:00-9:30")
            .unwrap()
            .into_iter()
            .map(|e| e.course_id.as_str())
            .collect();
        assert_eq!(ids, vec!["MATH101", "CHEM110"]);
    }

    #[test]
    fn test_unselected_courses_are_dropped() {
        let timetable = timetable();
        let selection = Selection::from_ids(["BIO300"]);
        assert!(filter_entries(&timetable, &selection, "Monday", "9:00-9:30")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_unknown_day_fails() {
        let timetable = timetable();
        let err = filter_entries(&timetable, &Selection::new(), "Sunday", "9:00-9:30").unwrap_err();
        assert!(matches!(err, TimetableError::InvalidKey(_)));
    }
}
