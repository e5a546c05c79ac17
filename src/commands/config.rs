use anyhow::Result;
use owo_colors::OwoColorize;
use timetable_core::config::TimetableConfig;

use super::AppContext;

pub fn run(ctx: &AppContext) -> Result<()> {
    let config_path = TimetableConfig::config_path()?;
    let config = &ctx.config;

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Timetable:  {}", config.timetable_path().display());
    println!("  Courses:    {}", config.courses_path().display());
    println!("  Selection:  {}", config.state_path().display());
    println!("  Exports:    {}", config.output_path().display());
    println!();
    println!("{}", "Settings".bold());
    for line in config.to_toml()?.lines() {
        println!("  {}", line);
    }

    Ok(())
}
