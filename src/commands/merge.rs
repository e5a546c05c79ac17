use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use timetable_core::Timetable;

pub fn run(first: &Path, second: &Path, output: &Path) -> Result<()> {
    let a = Timetable::load(first).with_context(|| format!("Could not load {}", first.display()))?;
    let b =
        Timetable::load(second).with_context(|| format!("Could not load {}", second.display()))?;

    let merged = a.merge(&b).context("Timetables could not be merged")?;
    std::fs::write(output, merged.to_json_pretty()?)
        .with_context(|| format!("Could not write {}", output.display()))?;

    println!("{} {}", "Merged into".green(), output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use timetable_core::Weekday;

    #[test]
    fn test_merge_writes_combined_timetable() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.json");
        let second = dir.path().join("b.json");
        let output = dir.path().join("merged.json");

        std::fs::write(
            &first,
            r#"{"Monday": {"9:00-9:30": [{"courseId": "MATH101", "classroom": "Room A", "classType": "class"}]}}"#,
        )
        .unwrap();
        std::fs::write(
            &second,
            r#"{"Monday": {"9:00-9:30": [{"courseId": "PHYS201", "classroom": "Lab 2", "classType": "lab"}]}}"#,
        )
        .unwrap();

        run(&first, &second, &output).unwrap();

        let merged = Timetable::load(&output).unwrap();
        let ids: Vec<_> = merged
            .entries(Weekday::Monday, "9:00-9:30")
            .iter()
            .map(|e| e.course_id.as_str())
            .collect();
        assert_eq!(ids, ["MATH101", "PHYS201"]);
    }

    #[test]
    fn test_merge_rejects_mismatched_slots() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.json");
        let second = dir.path().join("b.json");
        let output = dir.path().join("merged.json");

        std::fs::write(&first, r#"{"Monday": {"9:00-9:30": []}}"#).unwrap();
        std::fs::write(&second, r#"{"Tuesday": {"9:30-10:00": []}}"#).unwrap();

        assert!(run(&first, &second, &output).is_err());
        assert!(!output.exists());
    }
}
