use anyhow::Result;
use owo_colors::OwoColorize;
use timetable_core::WeekView;

use super::AppContext;
use crate::render::{Render, colored_course_id};

pub fn run(ctx: &AppContext) -> Result<()> {
    let timetable = ctx.timetable()?;
    let store = ctx.store()?;
    let selection = store.selection();

    let view = WeekView::build(&timetable, selection);
    println!("{}", view.render());
    println!();

    if selection.is_empty() {
        println!("{}", "No courses selected, showing everything".dimmed());
        return Ok(());
    }

    if view.is_blank() {
        println!("{}", "None of the selected courses meet this week".yellow());
    }

    // The catalog is only used for names; a missing one just shortens the legend.
    let catalog = ctx.catalog().ok();

    println!("{} selected", selection.len().bold());
    for course_id in selection.iter() {
        let name = catalog
            .as_ref()
            .and_then(|c| c.name_of(course_id))
            .unwrap_or_default();
        println!("  {} {}", colored_course_id(course_id), name.dimmed());
    }

    Ok(())
}
