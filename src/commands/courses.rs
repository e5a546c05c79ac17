use anyhow::Result;
use owo_colors::OwoColorize;

use super::AppContext;
use crate::render::colored_course_id;

pub fn run(ctx: &AppContext, query: Option<&str>) -> Result<()> {
    let catalog = ctx.catalog()?;
    let store = ctx.store()?;

    let courses = catalog.search(query.unwrap_or_default());
    if courses.is_empty() {
        println!("{}", "No courses found".dimmed());
        return Ok(());
    }

    for course in &courses {
        let mark = if store.contains(&course.course_id) {
            "●".green().to_string()
        } else {
            "○".dimmed().to_string()
        };
        println!("{} {} {}", mark, colored_course_id(&course.course_id), course.course_name);
    }

    println!();
    println!(
        "{}",
        format!("{} of {} courses, {} selected", courses.len(), catalog.len(), store.len()).dimmed()
    );

    Ok(())
}
