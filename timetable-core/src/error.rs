//! Error types for timetable operations.

use thiserror::Error;

/// Errors that can occur while loading, projecting or exporting a timetable.
#[derive(Error, Debug)]
pub enum TimetableError {
    #[error("Unknown weekday: {0}")]
    InvalidKey(String),

    #[error("Malformed time slot label: '{0}'")]
    MalformedSlotLabel(String),

    #[error("Time slots for {day} do not match the reference day (expected {expected:?}, found {found:?})")]
    SlotMismatch {
        day: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for TimetableError {
    fn from(e: serde_json::Error) -> Self {
        TimetableError::Serialization(e.to_string())
    }
}

/// Result type alias for timetable operations.
pub type TimetableResult<T> = Result<T, TimetableError>;
