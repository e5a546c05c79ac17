/// Product identifier written to exported calendar files.
pub const DEFAULT_PROD_ID: &str = "-//College Timetable//EN";

/// iCalendar version line value.
pub const ICS_VERSION: &str = "2.0";

/// Suffix appended to every generated event UID.
pub const UID_DOMAIN: &str = "college-timetable";

/// Pixel-density multiplier for image exports.
pub const DEFAULT_PIXEL_RATIO: u32 = 2;

/// Name of the persisted selection record.
pub const SELECTION_STORAGE_KEY: &str = "course-selection-storage";

/// Hours below this value are treated as afternoon hours written mod 12.
pub const DAY_START_HOUR: u32 = 8;

/// Prefix shared by exported file names.
pub const EXPORT_FILE_PREFIX: &str = "timetable";
