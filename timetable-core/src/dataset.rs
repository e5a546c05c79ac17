//! The static timetable dataset: weekday -> ordered time slots -> class entries.
//!
//! JSON object key order is significant here. Slots are compacted by their
//! position in the list, so both levels are read with hand-written map
//! visitors that keep the document order.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::error::{TimetableError, TimetableResult};
use crate::time_slot::SlotTimes;

/// A teaching day. Only the five weekdays exist in a timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Days after Monday (Monday = 0 ... Friday = 4).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        }
    }
}

impl FromStr for Weekday {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::ALL
            .into_iter()
            .find(|day| day.as_str() == s)
            .ok_or_else(|| TimetableError::InvalidKey(s.to_string()))
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One offering of a course in a slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassEntry {
    pub course_id: String,
    pub classroom: String,
    /// e.g. "class", "lab", "tutorial"
    pub class_type: String,
}

impl ClassEntry {
    pub fn new(course_id: &str, classroom: &str, class_type: &str) -> Self {
        ClassEntry {
            course_id: course_id.to_string(),
            classroom: classroom.to_string(),
            class_type: class_type.to_string(),
        }
    }
}

/// Slot label -> entries for a single day, in slot order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DaySchedule {
    slots: Vec<String>,
    entries: HashMap<String, Vec<ClassEntry>>,
}

impl DaySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a slot, or extend its entries if the label is already present.
    pub fn push_slot(&mut self, slot: impl Into<String>, entries: Vec<ClassEntry>) {
        let slot = slot.into();
        match self.entries.get_mut(&slot) {
            Some(existing) => existing.extend(entries),
            None => {
                self.slots.push(slot.clone());
                self.entries.insert(slot, entries);
            }
        }
    }

    pub fn with_slot(mut self, slot: impl Into<String>, entries: Vec<ClassEntry>) -> Self {
        self.push_slot(slot, entries);
        self
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    /// Entries for a slot; unknown slots have none.
    pub fn entries(&self, slot: &str) -> &[ClassEntry] {
        self.entries.get(slot).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ClassEntry])> {
        self.slots
            .iter()
            .map(|slot| (slot.as_str(), self.entries(slot)))
    }
}

impl Serialize for DaySchedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slots.len()))?;
        for (slot, entries) in self.iter() {
            map.serialize_entry(slot, entries)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DaySchedule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DayVisitor;

        impl<'de> Visitor<'de> for DayVisitor {
            type Value = DaySchedule;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of slot labels to class entries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<DaySchedule, A::Error> {
                let mut day = DaySchedule::new();
                while let Some((slot, entries)) = map.next_entry::<String, Vec<ClassEntry>>()? {
                    day.push_slot(slot, entries);
                }
                Ok(day)
            }
        }

        deserializer.deserialize_map(DayVisitor)
    }
}

/// Day names in document order, before they are checked.
struct RawTimetable(Vec<(String, DaySchedule)>);

impl<'de> Deserialize<'de> for RawTimetable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RawVisitor;

        impl<'de> Visitor<'de> for RawVisitor {
            type Value = RawTimetable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of weekday names to day schedules")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawTimetable, A::Error> {
                let mut days = Vec::new();
                while let Some(entry) = map.next_entry::<String, DaySchedule>()? {
                    days.push(entry);
                }
                Ok(RawTimetable(days))
            }
        }

        deserializer.deserialize_map(RawVisitor)
    }
}

/// The whole week. Every present day shares the same ordered slot labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timetable {
    days: BTreeMap<Weekday, DaySchedule>,
}

impl Timetable {
    /// Build a timetable from day schedules, checking the shared-slot invariant.
    pub fn from_days(days: impl IntoIterator<Item = (Weekday, DaySchedule)>) -> TimetableResult<Self> {
        let mut timetable = Timetable::default();
        for (day, schedule) in days {
            timetable.days.insert(day, schedule);
        }
        timetable.validate()?;
        Ok(timetable)
    }

    pub fn from_json(content: &str) -> TimetableResult<Self> {
        let raw: RawTimetable = serde_json::from_str(content)?;

        let days = raw
            .0
            .into_iter()
            .map(|(name, schedule)| -> TimetableResult<(Weekday, DaySchedule)> {
                Ok((name.parse()?, schedule))
            })
            .collect::<TimetableResult<Vec<_>>>()?;

        Self::from_days(days)
    }

    pub fn load(path: &Path) -> TimetableResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TimetableError::Dataset(format!("Could not read {}: {e}", path.display()))
        })?;
        let timetable = Self::from_json(&content)?;

        debug!(
            path = %path.display(),
            days = timetable.days.len(),
            slots = timetable.ordered_slots().len(),
            "Loaded timetable"
        );

        Ok(timetable)
    }

    pub fn to_json_pretty(&self) -> TimetableResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn day(&self, day: Weekday) -> Option<&DaySchedule> {
        self.days.get(&day)
    }

    pub fn days(&self) -> impl Iterator<Item = (Weekday, &DaySchedule)> {
        self.days.iter().map(|(day, schedule)| (*day, schedule))
    }

    /// Raw entries for a slot. A weekday without data has no entries.
    pub fn entries(&self, day: Weekday, slot: &str) -> &[ClassEntry] {
        self.day(day).map(|d| d.entries(slot)).unwrap_or(&[])
    }

    /// Slot labels of the reference day (Monday, or the first day present).
    pub fn ordered_slots(&self) -> &[String] {
        self.reference_day()
            .map(|(_, schedule)| schedule.slots())
            .unwrap_or(&[])
    }

    fn reference_day(&self) -> Option<(Weekday, &DaySchedule)> {
        self.days().next()
    }

    /// Check that all slot labels parse and every day carries the same
    /// ordered slot list as the reference day.
    pub fn validate(&self) -> TimetableResult<()> {
        let Some((_, reference)) = self.reference_day() else {
            return Ok(());
        };

        for label in reference.slots() {
            SlotTimes::parse(label)?;
        }

        for (day, schedule) in self.days() {
            if schedule.slots() != reference.slots() {
                return Err(TimetableError::SlotMismatch {
                    day: day.to_string(),
                    expected: reference.slots().to_vec(),
                    found: schedule.slots().to_vec(),
                });
            }
        }

        Ok(())
    }

    /// Combine two timetables. Entries of `other` are appended after ours slot
    /// by slot; days and slots we lack are appended in `other`'s order.
    pub fn merge(&self, other: &Timetable) -> TimetableResult<Timetable> {
        let mut merged = self.clone();

        for (day, schedule) in other.days() {
            let target = merged.days.entry(day).or_default();
            for (slot, entries) in schedule.iter() {
                target.push_slot(slot, entries.to_vec());
            }
        }

        merged.validate()?;
        Ok(merged)
    }
}

impl Serialize for Timetable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for (day, schedule) in self.days() {
            map.serialize_entry(day.as_str(), schedule)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "Monday": {
            "9:30-10:00": [{"courseId": "PHYS201", "classroom": "Lab 2", "classType": "lab"}],
            "9:00-9:30": [{"courseId": "MATH101", "classroom": "Room A", "classType": "class"}],
            "10:00-10:30": []
        },
        "Tuesday": {
            "9:30-10:00": [],
            "9:00-9:30": [],
            "10:00-10:30": []
        }
    }"#;

    #[test]
    fn test_from_json_keeps_document_slot_order() {
        let timetable = Timetable::from_json(SAMPLE).unwrap();
        assert_eq!(
            timetable.ordered_slots(),
            &["9:30-10:00", "9:00-9:30", "10:00-10:30"]
        );
        assert_eq!(
            timetable.entries(Weekday::Monday, "9:00-9:30"),
            &[ClassEntry::new("MATH101", "Room A", "class")]
        );
    }

    #[test]
    fn test_missing_day_and_slot_have_no_entries() {
        let timetable = Timetable::from_json(SAMPLE).unwrap();
        assert!(timetable.entries(Weekday::Friday, "9:00-9:30").is_empty());
        assert!(timetable.entries(Weekday::Monday, "18:00-18:30").is_empty());
    }

    #[test]
    fn test_unknown_day_is_invalid_key() {
        let err = Timetable::from_json(r#"{"Saturday": {"9:00-9:30": []}}"#).unwrap_err();
        assert!(matches!(err, TimetableError::InvalidKey(day) if day == "Saturday"));
    }

    #[test]
    fn test_days_with_different_slots_are_rejected() {
        let content = r#"{
            "Monday": {"9:00-9:30": [], "9:30-10:00": []},
            "Tuesday": {"9:30-10:00": [], "9:00-9:30": []}
        }"#;
        let err = Timetable::from_json(content).unwrap_err();
        assert!(matches!(err, TimetableError::SlotMismatch { ref day, .. } if day == "Tuesday"));
    }

    #[test]
    fn test_malformed_slot_label_is_rejected_at_load() {
        let err = Timetable::from_json(r#"{"Monday": {"nine-ten": []}}"#).unwrap_err();
        assert!(matches!(err, TimetableError::MalformedSlotLabel(_)));
    }

    #[test]
    fn test_weekday_parse_and_index() {
        assert_eq!("Wednesday".parse::<Weekday>().unwrap(), Weekday::Wednesday);
        assert_eq!(Weekday::Friday.index(), 4);
        assert!("monday".parse::<Weekday>().is_err());
    }

    #[test]
    fn test_merge_appends_entries_per_slot() {
        let first = Timetable::from_json(
            r#"{"Monday": {"9:00-9:30": [{"courseId": "MATH101", "classroom": "A", "classType": "class"}], "9:30-10:00": []}}"#,
        )
        .unwrap();
        let second = Timetable::from_json(
            r#"{"Monday": {"9:00-9:30": [{"courseId": "CHEM110", "classroom": "B", "classType": "lab"}], "9:30-10:00": []}}"#,
        )
        .unwrap();

        let merged = first.merge(&second).unwrap();
        let ids: Vec<_> = merged
            .entries(Weekday::Monday, "9:00-9:30")
            .iter()
            .map(|e| e.course_id.as_str())
            .collect();
        assert_eq!(ids, vec!["MATH101", "CHEM110"]);
        assert_eq!(merged.ordered_slots(), &["9:00-9:30", "9:30-10:00"]);
    }

    #[test]
    fn test_json_output_round_trips_slot_order() {
        let timetable = Timetable::from_json(SAMPLE).unwrap();
        let json = timetable.to_json_pretty().unwrap();
        let reloaded = Timetable::from_json(&json).unwrap();
        assert_eq!(reloaded, timetable);
        assert!(json.find("9:30-10:00").unwrap() < json.find("9:00-9:30").unwrap());
    }
}
