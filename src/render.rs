//! Terminal rendering of the compacted week.
//!
//! Each slot is a fixed-width column; a span is drawn as one cell as wide as
//! the slots it covers.

use owo_colors::OwoColorize;
use timetable_core::color::course_color;
use timetable_core::time_slot::slot_header;
use timetable_core::{DayRow, Span, WeekView};

/// Width of one slot column, including its separator.
const SLOT_WIDTH: usize = 8;

/// Width of the leading day-name column.
const DAY_WIDTH: usize = 10;

pub trait Render {
    fn render(&self) -> String;
}

/// A course ID in its course colour.
pub fn colored_course_id(course_id: &str) -> String {
    let [r, g, b] = course_color(course_id).rgb();
    course_id.truecolor(r, g, b).bold().to_string()
}

/// Fit `text` into exactly `width` columns.
fn fit(text: &str, width: usize) -> String {
    let truncated: String = text.chars().take(width).collect();
    format!("{:<width$}", truncated, width = width)
}

/// Plain-text content of a span cell, before colouring.
fn cell_text(span: &Span) -> String {
    match span.entries.as_slice() {
        [] => String::new(),
        [entry] if entry.class_type == "class" => format!("{} {}", entry.course_id, entry.classroom),
        [entry] => format!(
            "{} {} {}",
            entry.course_id,
            entry.classroom,
            entry.class_type.to_uppercase()
        ),
        entries => entries
            .iter()
            .map(|e| e.course_id.as_str())
            .collect::<Vec<_>>()
            .join("/"),
    }
}

fn render_span(span: &Span) -> String {
    let width = span.len * SLOT_WIDTH - 1;
    let text = fit(&cell_text(span), width);

    let cell = match span.single() {
        Some(entry) => {
            let [r, g, b] = course_color(&entry.course_id).rgb();
            text.truecolor(r, g, b).to_string()
        }
        None if span.entries.len() > 1 => text.yellow().to_string(),
        None => text,
    };

    format!("{}{}", cell, "│".dimmed())
}

impl Render for DayRow<'_> {
    fn render(&self) -> String {
        let mut line = fit(self.day.as_str(), DAY_WIDTH).bold().to_string();
        line.push_str(&"│".dimmed().to_string());
        for span in &self.spans {
            line.push_str(&render_span(span));
        }
        line
    }
}

impl Render for WeekView<'_> {
    fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 2);

        let mut header = fit("", DAY_WIDTH);
        header.push('│');
        for slot in self.slots {
            header.push_str(&fit(slot_header(slot), SLOT_WIDTH - 1));
            header.push('│');
        }
        lines.push(header.dimmed().to_string());

        let rule_width = DAY_WIDTH + 1 + self.slots.len() * SLOT_WIDTH;
        lines.push("─".repeat(rule_width).dimmed().to_string());

        for row in &self.rows {
            lines.push(row.render());
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timetable_core::{ClassEntry, Weekday};

    fn span<'a>(len: usize, entries: Vec<&'a ClassEntry>) -> Span<'a> {
        Span {
            day: Weekday::Monday,
            start: 0,
            len,
            entries,
        }
    }

    #[test]
    fn test_fit_pads_and_truncates() {
        assert_eq!(fit("MATH", 6), "MATH  ");
        assert_eq!(fit("MATH101 Room A", 7), "MATH101");
    }

    #[test]
    fn test_cell_text() {
        let math = ClassEntry::new("MATH101", "Room A", "class");
        let lab = ClassEntry::new("PHYS201", "Lab 2", "lab");

        assert_eq!(cell_text(&span(2, vec![&math])), "MATH101 Room A");
        assert_eq!(cell_text(&span(1, vec![&lab])), "PHYS201 Lab 2 LAB");
        assert_eq!(cell_text(&span(1, vec![&math, &lab])), "MATH101/PHYS201");
        assert_eq!(cell_text(&span(3, vec![])), "");
    }
}
