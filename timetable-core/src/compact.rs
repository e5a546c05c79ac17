//! Column-span compaction of a day's slots.
//!
//! A day is scanned left to right and runs of slots are merged into spans:
//! consecutive slots holding the same single entry form one span, as do
//! consecutive empty slots. A slot with two or more entries is always a span
//! of its own. The spans of a day partition its slot list.

use crate::dataset::{ClassEntry, Timetable, Weekday};
use crate::filter::filtered;
use crate::selection::Selection;

/// A run of slots rendered as one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span<'a> {
    pub day: Weekday,
    /// Index of the first slot in the ordered slot list.
    pub start: usize,
    /// Number of slots covered (always at least 1).
    pub len: usize,
    /// Filtered entries of the first slot.
    pub entries: Vec<&'a ClassEntry>,
}

impl<'a> Span<'a> {
    /// Index one past the last covered slot.
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The single entry of a merged course span.
    pub fn single(&self) -> Option<&'a ClassEntry> {
        match self.entries.as_slice() {
            [entry] => Some(*entry),
            _ => None,
        }
    }

    pub fn first_slot<'s>(&self, slots: &'s [String]) -> &'s str {
        &slots[self.start]
    }

    pub fn last_slot<'s>(&self, slots: &'s [String]) -> &'s str {
        &slots[self.end() - 1]
    }
}

/// Whether two adjacent slots may share a span.
fn mergeable(first: &[&ClassEntry], next: &[&ClassEntry]) -> bool {
    match (first, next) {
        ([], []) => true,
        ([a], [b]) => a == b,
        _ => false,
    }
}

/// Compact one day's slots into spans covering every slot exactly once.
pub fn compact_day<'a>(
    timetable: &'a Timetable,
    selection: &Selection,
    day: Weekday,
    slots: &[String],
) -> Vec<Span<'a>> {
    let per_slot: Vec<Vec<&'a ClassEntry>> = slots
        .iter()
        .map(|slot| filtered(timetable, selection, day, slot))
        .collect();

    let mut spans = Vec::new();
    let mut i = 0;

    while i < per_slot.len() {
        let first = &per_slot[i];
        let mut j = i + 1;

        if first.len() <= 1 {
            while j < per_slot.len() && mergeable(first, &per_slot[j]) {
                j += 1;
            }
        }

        spans.push(Span {
            day,
            start: i,
            len: j - i,
            entries: first.clone(),
        });
        i = j;
    }

    spans
}

/// One weekday row of a [`WeekView`].
#[derive(Debug, Clone)]
pub struct DayRow<'a> {
    pub day: Weekday,
    pub spans: Vec<Span<'a>>,
}

/// The compacted week: what the grid and image renderers draw.
#[derive(Debug, Clone)]
pub struct WeekView<'a> {
    pub slots: &'a [String],
    pub rows: Vec<DayRow<'a>>,
    /// Whether a course filter was applied.
    pub filtered: bool,
}

impl<'a> WeekView<'a> {
    pub fn build(timetable: &'a Timetable, selection: &Selection) -> Self {
        let slots = timetable.ordered_slots();
        let rows = Weekday::ALL
            .into_iter()
            .map(|day| DayRow {
                day,
                spans: compact_day(timetable, selection, day, slots),
            })
            .collect();

        WeekView {
            slots,
            rows,
            filtered: !selection.is_empty(),
        }
    }

    /// True when no slot of any day holds an entry.
    pub fn is_blank(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.spans.iter().all(Span::is_empty))
    }
}
