use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use timetable_core::WeekView;
use timetable_core::export::Exporter;

use super::AppContext;
use crate::ExportFormat;
use crate::png::PngRenderer;

pub fn run(ctx: &AppContext, format: ExportFormat, output: Option<&Path>) -> Result<()> {
    let timetable = ctx.timetable()?;
    let store = ctx.store()?;

    let output_dir = output.map(Path::to_path_buf).unwrap_or_else(|| ctx.config.output_path());
    let exporter = Exporter::new(output_dir);
    let today = chrono::Local::now().date_naive();

    let written = match format {
        ExportFormat::Ics => exporter
            .export_ics(&timetable, store.selection(), &ctx.config.prod_id, today)
            .context("Calendar export failed")?,
        ExportFormat::Image => {
            let view = WeekView::build(&timetable, store.selection());
            exporter
                .export_image(&PngRenderer, &view, ctx.config.pixel_ratio, today)
                .context("Image export failed")?
        }
    };

    match written {
        Some(path) => println!("{} {}", "Exported".green(), path.display()),
        None => println!(
            "{}",
            "Nothing selected. Pick courses with `timetable select add <ID>` first.".yellow()
        ),
    }

    Ok(())
}
