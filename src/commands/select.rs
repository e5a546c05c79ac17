use anyhow::Result;
use owo_colors::OwoColorize;
use timetable_core::CourseCatalog;

use super::AppContext;
use crate::SelectAction;
use crate::render::colored_course_id;

pub fn run(ctx: &AppContext, action: SelectAction) -> Result<()> {
    let mut store = ctx.store()?;
    let catalog = ctx.catalog().ok();

    match action {
        SelectAction::List => {
            if store.is_empty() {
                println!("{}", "No courses selected".dimmed());
            }
            for course_id in store.selection().iter() {
                println!("{}", colored_course_id(course_id));
            }
            return Ok(());
        }
        SelectAction::Add { course_ids } => {
            warn_unknown(catalog.as_ref(), &course_ids);
            store.select_many(&course_ids)?;
            for id in &course_ids {
                println!("{} {}", "+".green(), colored_course_id(id));
            }
        }
        SelectAction::Remove { course_ids } => {
            for id in &course_ids {
                if store.contains(id) {
                    store.remove(id)?;
                    println!("{} {}", "-".red(), colored_course_id(id));
                } else {
                    println!("{} {} was not selected", "·".dimmed(), id);
                }
            }
        }
        SelectAction::Toggle { course_ids } => {
            warn_unknown(catalog.as_ref(), &course_ids);
            for id in &course_ids {
                if store.toggle(id)? {
                    println!("{} {}", "+".green(), colored_course_id(id));
                } else {
                    println!("{} {}", "-".red(), colored_course_id(id));
                }
            }
        }
        SelectAction::Clear => {
            store.clear()?;
            println!("{}", "Selection cleared".green());
        }
        SelectAction::Set { course_ids } => {
            warn_unknown(catalog.as_ref(), &course_ids);
            store.set_all(&course_ids)?;
        }
    }

    println!("{}", format!("{} selected", store.len()).dimmed());
    Ok(())
}

/// IDs that are not in the catalog are still accepted, the dataset may know them.
fn warn_unknown(catalog: Option<&CourseCatalog>, course_ids: &[String]) {
    let Some(catalog) = catalog else {
        return;
    };
    for id in course_ids {
        if catalog.get(id).is_none() {
            println!("{} {} is not in the course list", "!".yellow(), id);
        }
    }
}
