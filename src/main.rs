mod commands;
mod png;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use timetable_core::config::TimetableConfig;
use tracing_subscriber::EnvFilter;

use crate::commands::AppContext;

#[derive(Parser)]
#[command(name = "timetable")]
#[command(about = "Browse your weekly class timetable and export it to an image or calendar file")]
struct Cli {
    /// Directory holding class.json, courses.json and the saved selection
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the week, filtered to the selected courses
    Show,
    /// List courses, optionally filtered by a search term
    Courses {
        /// Matches course ID or name (case-insensitive)
        query: Option<String>,
    },
    /// Change which courses are selected
    Select {
        #[command(subcommand)]
        action: SelectAction,
    },
    /// Export the selected courses
    Export {
        #[command(subcommand)]
        format: ExportFormat,

        /// Directory to write the export to
        #[arg(short, long, global = true)]
        output: Option<PathBuf>,
    },
    /// Show where settings and data are read from
    Config,
    /// Merge two timetable files into one
    Merge {
        first: PathBuf,
        second: PathBuf,

        /// Where to write the merged timetable
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum SelectAction {
    /// Print the selected course IDs
    List,
    /// Select courses
    Add { course_ids: Vec<String> },
    /// Deselect courses
    Remove { course_ids: Vec<String> },
    /// Flip the selection of each course
    Toggle { course_ids: Vec<String> },
    /// Deselect everything
    Clear,
    /// Replace the selection
    Set { course_ids: Vec<String> },
}

#[derive(Subcommand)]
pub enum ExportFormat {
    /// Weekly-recurring iCalendar file
    Ics,
    /// PNG picture of the timetable
    Image,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut config = TimetableConfig::load()?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    let ctx = AppContext::new(config);

    match cli.command {
        Commands::Show => commands::show::run(&ctx),
        Commands::Config => commands::config::run(&ctx),
        Commands::Courses { query } => commands::courses::run(&ctx, query.as_deref()),
        Commands::Select { action } => commands::select::run(&ctx, action),
        Commands::Export { format, output } => {
            commands::export::run(&ctx, format, output.as_deref())
        }
        Commands::Merge {
            first,
            second,
            output,
        } => commands::merge::run(&first, &second, &output),
    }
}
