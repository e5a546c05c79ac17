//! ICS calendar file generation.

mod generate;

pub use generate::generate_ics;
