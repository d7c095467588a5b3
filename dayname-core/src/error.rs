//! Error types for dayname.

use chrono::NaiveDate;
use thiserror::Error;

/// Why a fragment could not be turned into exactly one record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatErrorKind {
    #[error("no event pattern found")]
    NoMatch,

    #[error("{matches} event patterns found, expected exactly one")]
    Ambiguous { matches: usize },

    #[error("event has no name")]
    MissingName,

    #[error("{month}/{day}/{year} is not a valid date")]
    InvalidDate { month: u32, day: u32, year: i32 },

    #[error("'{0}' is not a weekday")]
    InvalidWeekday(String),
}

/// A fragment's text does not match the layout's pattern exactly once.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed parsing '{text}': {kind}")]
pub struct FormatError {
    pub text: String,
    pub kind: FormatErrorKind,
}

impl FormatError {
    pub fn new(text: &str, kind: FormatErrorKind) -> Self {
        FormatError {
            text: text.to_string(),
            kind,
        }
    }
}

/// The date sequence cannot be reconciled, even after repair.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataInconsistency {
    #[error("Dates are not consecutive: {candidate} does not follow {previous}")]
    NotConsecutive {
        previous: NaiveDate,
        candidate: NaiveDate,
    },

    #[error("Date {date} is more than {tolerance_days} days away from {now}")]
    OutOfTolerance {
        date: NaiveDate,
        now: NaiveDate,
        tolerance_days: i64,
    },
}

/// Errors that can occur in dayname operations.
#[derive(Error, Debug)]
pub enum DaynameError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("No events were found. Did the page layout change?")]
    EmptyResult,

    #[error(transparent)]
    DataInconsistency(#[from] DataInconsistency),

    #[error("Record '{0}' does not match the layout's strategy")]
    StrategyMismatch(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid selector '{0}'")]
    Selector(String),

    #[error("No element matches root selector '{0}'")]
    RootNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("ICS error: {0}")]
    Ics(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for dayname operations.
pub type DaynameResult<T> = Result<T, DaynameError>;
