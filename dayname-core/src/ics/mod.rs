//! ICS file generation and parsing for all-day entries.
//!
//! Only the handful of properties a day entry carries are written and read
//! back; everything else in a file is ignored.

mod generate;
mod parse;

pub use generate::generate_ics;
pub use parse::parse_entry;

use chrono::NaiveDate;

/// One all-day calendar entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayEntry {
    pub uid: String,
    pub date: NaiveDate,
    pub summary: String,
    /// History of changes, one `'title' created/updated: <time>` note per change
    pub description: Option<String>,
}
