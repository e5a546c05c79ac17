//! Application configuration at ~/.config/timetable/config.toml

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PIXEL_RATIO, DEFAULT_PROD_ID};
use crate::error::{TimetableError, TimetableResult};

static DEFAULT_DATA_DIR: &str = "~/timetable";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_timetable_file() -> String {
    "class.json".to_string()
}

fn default_courses_file() -> String {
    "courses.json".to_string()
}

fn default_state_file() -> String {
    "selection.json".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_pixel_ratio() -> u32 {
    DEFAULT_PIXEL_RATIO
}

fn default_prod_id() -> String {
    DEFAULT_PROD_ID.to_string()
}

/// Settings read from the config file, overridable with `TIMETABLE_*`
/// environment variables.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TimetableConfig {
    /// Directory holding the dataset and the saved selection.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_timetable_file")]
    pub timetable_file: String,

    #[serde(default = "default_courses_file")]
    pub courses_file: String,

    #[serde(default = "default_state_file")]
    pub state_file: String,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_pixel_ratio")]
    pub pixel_ratio: u32,

    #[serde(default = "default_prod_id")]
    pub prod_id: String,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        TimetableConfig {
            data_dir: default_data_dir(),
            timetable_file: default_timetable_file(),
            courses_file: default_courses_file(),
            state_file: default_state_file(),
            output_dir: default_output_dir(),
            pixel_ratio: default_pixel_ratio(),
            prod_id: default_prod_id(),
        }
    }
}

impl TimetableConfig {
    pub fn config_path() -> TimetableResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TimetableError::Config("Could not determine config directory".into()))?
            .join("timetable");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user's config, creating a commented default file on first run.
    pub fn load() -> TimetableResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> TimetableResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("TIMETABLE"))
            .build()
            .map_err(|e| TimetableError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| TimetableError::Config(e.to_string()))
    }

    /// `data_dir` with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        expand(&self.data_dir)
    }

    pub fn timetable_path(&self) -> PathBuf {
        self.data_path().join(&self.timetable_file)
    }

    pub fn courses_path(&self) -> PathBuf {
        self.data_path().join(&self.courses_file)
    }

    pub fn state_path(&self) -> PathBuf {
        self.data_path().join(&self.state_file)
    }

    pub fn output_path(&self) -> PathBuf {
        expand(&self.output_dir)
    }

    /// The effective settings, as they would appear in config.toml.
    pub fn to_toml(&self) -> TimetableResult<String> {
        toml::to_string_pretty(self).map_err(|e| TimetableError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> TimetableResult<()> {
        let contents = format!(
            "\
# timetable configuration

# Where class.json, courses.json and the saved selection live:
# data_dir = \"{}\"

# Dataset file names inside data_dir:
# timetable_file = \"class.json\"
# courses_file = \"courses.json\"
# state_file = \"selection.json\"

# Where exports are written:
# output_dir = \".\"

# Pixel density of exported images:
# pixel_ratio = {}

# PRODID written to exported calendar files:
# prod_id = \"{}\"
",
            DEFAULT_DATA_DIR, DEFAULT_PIXEL_RATIO, DEFAULT_PROD_ID
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TimetableError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| TimetableError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
