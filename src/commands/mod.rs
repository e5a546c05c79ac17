pub mod config;
pub mod courses;
pub mod export;
pub mod merge;
pub mod select;
pub mod show;

use anyhow::{Context, Result};
use timetable_core::config::TimetableConfig;
use timetable_core::{CourseCatalog, JsonFileStore, SelectionStore, Timetable};

/// Shared state handed to every command.
pub struct AppContext {
    pub config: TimetableConfig,
}

impl AppContext {
    pub fn new(config: TimetableConfig) -> Self {
        AppContext { config }
    }

    pub fn timetable(&self) -> Result<Timetable> {
        let path = self.config.timetable_path();
        Timetable::load(&path)
            .with_context(|| format!("Could not load timetable from {}", path.display()))
    }

    pub fn catalog(&self) -> Result<CourseCatalog> {
        let path = self.config.courses_path();
        CourseCatalog::load(&path)
            .with_context(|| format!("Could not load courses from {}", path.display()))
    }

    pub fn store(&self) -> Result<SelectionStore<JsonFileStore>> {
        let path = self.config.state_path();
        SelectionStore::open(JsonFileStore::new(&path))
            .with_context(|| format!("Could not read saved selection from {}", path.display()))
    }
}
