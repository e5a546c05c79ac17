//! Export sink: writes the calendar file or a rendered image to disk.
//!
//! Both exports are declined (nothing written, `Ok(None)`) when no course is
//! selected. A failed export leaves no file behind.

use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::{debug, error, info};

use crate::compact::WeekView;
use crate::constants::EXPORT_FILE_PREFIX;
use crate::dataset::Timetable;
use crate::error::{TimetableError, TimetableResult};
use crate::ics::generate_ics;
use crate::projector::project;
use crate::selection::Selection;
use crate::time_slot::next_monday;

/// Turns a compacted week into encoded image bytes.
pub trait ImageRenderer {
    /// Render `view` scaled by `pixel_ratio`.
    fn render(&self, view: &WeekView<'_>, pixel_ratio: u32) -> TimetableResult<Vec<u8>>;

    /// File extension of the encoded image, without the dot.
    fn extension(&self) -> &'static str;
}

/// `timetable-YYYY-MM-DD.<extension>`
pub fn export_file_name(today: NaiveDate, extension: &str) -> String {
    format!("{}-{}.{}", EXPORT_FILE_PREFIX, today.format("%Y-%m-%d"), extension)
}

pub struct Exporter {
    output_dir: PathBuf,
}

impl Exporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Exporter {
            output_dir: output_dir.into(),
        }
    }

    /// Write the selected courses as a weekly-recurring .ics file, anchored
    /// at the Monday on or after `today`.
    pub fn export_ics(
        &self,
        timetable: &Timetable,
        selection: &Selection,
        prod_id: &str,
        today: NaiveDate,
    ) -> TimetableResult<Option<PathBuf>> {
        if selection.is_empty() {
            debug!("No courses selected, skipping calendar export");
            return Ok(None);
        }

        let events = project(timetable, selection, timetable.ordered_slots(), next_monday(today));
        let content = generate_ics(&events, prod_id);

        let path = self.write(&export_file_name(today, "ics"), content.as_bytes())?;
        info!(path = %path.display(), events = events.len(), "Exported calendar");
        Ok(Some(path))
    }

    /// Render the week with `renderer` and write the image.
    pub fn export_image(
        &self,
        renderer: &dyn ImageRenderer,
        view: &WeekView<'_>,
        pixel_ratio: u32,
        today: NaiveDate,
    ) -> TimetableResult<Option<PathBuf>> {
        if !view.filtered {
            debug!("No courses selected, skipping image export");
            return Ok(None);
        }

        let bytes = renderer.render(view, pixel_ratio).map_err(|e| {
            error!(error = %e, "Rendering timetable image failed");
            match e {
                TimetableError::Export(_) => e,
                other => TimetableError::Export(other.to_string()),
            }
        })?;

        let path = self.write(&export_file_name(today, renderer.extension()), &bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "Exported image");
        Ok(Some(path))
    }

    /// Write through a temp file so a failure never leaves a partial export.
    fn write(&self, file_name: &str, bytes: &[u8]) -> TimetableResult<PathBuf> {
        let path = self.output_dir.join(file_name);
        let temp = self.output_dir.join(format!(".{file_name}.tmp"));

        let result = std::fs::create_dir_all(&self.output_dir)
            .and_then(|_| std::fs::write(&temp, bytes))
            .and_then(|_| std::fs::rename(&temp, &path));

        if let Err(e) = result {
            let _ = std::fs::remove_file(&temp);
            error!(path = %path.display(), error = %e, "Export failed");
            return Err(TimetableError::Export(format!(
                "Could not write {}: {e}",
                path.display()
            )));
        }

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{ClassEntry, DaySchedule, Weekday};

    struct FixedRenderer;

    impl ImageRenderer for FixedRenderer {
        fn render(&self, view: &WeekView<'_>, pixel_ratio: u32) -> TimetableResult<Vec<u8>> {
            Ok(vec![view.rows.len() as u8, pixel_ratio as u8])
        }

        fn extension(&self) -> &'static str {
            "png"
        }
    }

    struct FailingRenderer;

    impl ImageRenderer for FailingRenderer {
        fn render(&self, _view: &WeekView<'_>, _pixel_ratio: u32) -> TimetableResult<Vec<u8>> {
            Err(TimetableError::Export("surface lost".into()))
        }

        fn extension(&self) -> &'static str {
            "png"
        }
    }

    fn today() -> NaiveDate {
        // A Wednesday; the anchor is Monday 2025-03-24.
        NaiveDate::from_ymd_opt(2025, 3, 19).unwrap()
    }

    fn timetable() -> Timetable {
        let day = DaySchedule::new()
            .with_slot("9:00-9:30", vec![ClassEntry::new("MATH101", "Room A", "class")])
            .with_slot("9:30-10:00", vec![ClassEntry::new("MATH101", "Room A", "class")]);
        Timetable::from_days([(Weekday::Monday, day)]).unwrap()
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name(today(), "ics"), "timetable-2025-03-19.ics");
    }

    #[test]
    fn test_export_ics_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(dir.path());

        let path = exporter
            .export_ics(&timetable(), &Selection::from_ids(["MATH101"]), "-//Test//EN", today())
            .unwrap()
            .expect("export should not be declined");

        assert_eq!(path, dir.path().join("timetable-2025-03-19.ics"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("PRODID:-//Test//EN"));
        assert!(content.contains("DTSTART:20250324T090000"));
        assert!(content.contains("DTEND:20250324T100000"));
    }

    #[test]
    fn test_export_declined_without_selection() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(dir.path());
        let timetable = timetable();

        let ics = exporter
            .export_ics(&timetable, &Selection::new(), "-//Test//EN", today())
            .unwrap();
        let view = WeekView::build(&timetable, &Selection::new());
        let image = exporter.export_image(&FixedRenderer, &view, 2, today()).unwrap();

        assert!(ics.is_none());
        assert!(image.is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_export_image_writes_renderer_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(dir.path());
        let timetable = timetable();
        let view = WeekView::build(&timetable, &Selection::from_ids(["MATH101"]));

        let path = exporter
            .export_image(&FixedRenderer, &view, 2, today())
            .unwrap()
            .unwrap();

        assert_eq!(path.file_name().unwrap(), "timetable-2025-03-19.png");
        assert_eq!(std::fs::read(&path).unwrap(), vec![5, 2]);
    }

    #[test]
    fn test_failed_render_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(dir.path());
        let timetable = timetable();
        let view = WeekView::build(&timetable, &Selection::from_ids(["MATH101"]));

        let err = exporter
            .export_image(&FailingRenderer, &view, 2, today())
            .unwrap_err();

        assert!(matches!(err, TimetableError::Export(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
