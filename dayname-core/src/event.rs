//! Event types flowing through the extraction pipeline.
//!
//! A `RawEventRecord` comes straight out of the tokenizer and may still carry a
//! mistyped year. A `ValidatedEvent` has passed the sequence checks and carries
//! the title that ends up on the calendar.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// When an event happens: a full date, or a bare weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Temporal {
    Date(NaiveDate),
    Weekday(Weekday),
}

impl Temporal {
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Temporal::Date(date) => Some(*date),
            Temporal::Weekday(_) => None,
        }
    }

    /// The calendar date this temporal lands on, relative to `today`.
    /// Weekdays resolve to their next occurrence on or after `today`.
    pub fn resolve(&self, today: NaiveDate) -> NaiveDate {
        match self {
            Temporal::Date(date) => *date,
            Temporal::Weekday(weekday) => {
                let ahead = (weekday.num_days_from_monday() + 7
                    - today.weekday().num_days_from_monday())
                    % 7;
                today + Duration::days(i64::from(ahead))
            }
        }
    }
}

impl fmt::Display for Temporal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Temporal::Date(date) => write!(f, "{}", date.format("%m/%d/%Y")),
            Temporal::Weekday(weekday) => write!(f, "{}", weekday_name(*weekday)),
        }
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// A record as tokenized from one fragment, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEventRecord {
    pub temporal: Temporal,
    pub name: String,
}

impl RawEventRecord {
    pub fn new(temporal: Temporal, name: impl Into<String>) -> Self {
        RawEventRecord {
            temporal,
            name: name.into(),
        }
    }
}

/// A record that passed validation, with its calendar title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedEvent {
    pub temporal: Temporal,
    pub display_name: String,
}

impl fmt::Display for ValidatedEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} - {}", self.temporal, self.display_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekday_resolves_to_next_occurrence() {
        // 2024-03-14 is a Thursday
        let today = date(2024, 3, 14);

        assert_eq!(Temporal::Weekday(Weekday::Thu).resolve(today), today);
        assert_eq!(Temporal::Weekday(Weekday::Fri).resolve(today), date(2024, 3, 15));
        assert_eq!(Temporal::Weekday(Weekday::Wed).resolve(today), date(2024, 3, 20));
    }

    #[test]
    fn test_display_formats() {
        let event = ValidatedEvent {
            temporal: Temporal::Date(date(2024, 3, 14)),
            display_name: "IYD: Pi Day".to_string(),
        };
        assert_eq!(event.to_string(), "03/14/2024 - IYD: Pi Day");

        let weekly = ValidatedEvent {
            temporal: Temporal::Weekday(Weekday::Tue),
            display_name: "IYD: Taco Night".to_string(),
        };
        assert_eq!(weekly.to_string(), "Tuesday - IYD: Taco Night");
    }
}
