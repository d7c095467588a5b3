//! Turning one text fragment into one raw event record.

use chrono::{NaiveDate, Weekday};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::error::{FormatError, FormatErrorKind};
use crate::event::{RawEventRecord, Temporal};
use crate::fragment::Fragment;

/// Date groups separated by any run of punctuation or spaces on the same line
/// ("3/14/24", "3-14-2024", "3 /  14 / 24"), then a colon or whitespace before
/// the name.
const MONTH_DAY_YEAR_PATTERN: &str = r"\b(?P<month>[0-9]{1,2})[^0-9A-Za-z\r\n]+(?P<day>[0-9]{1,2})[^0-9A-Za-z\r\n]+(?P<year>[0-9]{4}|[0-9]{2})(?:[^\S\r\n]*:|[^\S\r\n]+)";

/// A weekday at the start of a line. Names often mention weekdays too
/// ("Meatless Monday"), so only a line-leading weekday counts.
const WEEKDAY_PATTERN: &str = r"(?im)^[^\S\r\n]*(?P<weekday>monday|tuesday|wednesday|thursday|friday|saturday|sunday)(?:[^\S\r\n]*:|[^\S\r\n]+)";

/// How event lines are written on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// "3/14/24: Pi Day"
    #[default]
    MonthDayYear,
    /// "Tuesday: Taco Night"
    Weekday,
}

impl Strategy {
    fn pattern(&self) -> &'static str {
        match self {
            Strategy::MonthDayYear => MONTH_DAY_YEAR_PATTERN,
            Strategy::Weekday => WEEKDAY_PATTERN,
        }
    }
}

/// Holds the compiled pattern for one strategy.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    strategy: Strategy,
    head: Regex,
}

impl Tokenizer {
    pub fn new(strategy: Strategy) -> Result<Self, regex::Error> {
        Ok(Tokenizer {
            strategy,
            head: Regex::new(strategy.pattern())?,
        })
    }

    /// Extract exactly one record from the fragment.
    ///
    /// A fragment with no event head, or with more than one (two event lines
    /// run together), is rejected outright.
    pub fn tokenize(&self, fragment: &Fragment) -> Result<RawEventRecord, FormatError> {
        let text = fragment.text.as_str();
        let fail = |kind| FormatError::new(text, kind);

        let heads: Vec<Captures> = self.head.captures_iter(text).collect();
        let captures = match heads.as_slice() {
            [] => return Err(fail(FormatErrorKind::NoMatch)),
            [captures] => captures,
            many => {
                return Err(fail(FormatErrorKind::Ambiguous {
                    matches: many.len(),
                }));
            }
        };

        let head_end = captures.get(0).map_or(0, |m| m.end());
        let name = text[head_end..]
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .trim_start_matches([':', '-'])
            .trim();

        if name.is_empty() {
            return Err(fail(FormatErrorKind::MissingName));
        }

        let temporal = match self.strategy {
            Strategy::MonthDayYear => Temporal::Date(date_from_captures(captures).map_err(fail)?),
            Strategy::Weekday => Temporal::Weekday(weekday_from_captures(captures).map_err(fail)?),
        };

        Ok(RawEventRecord::new(temporal, name))
    }
}

fn field(captures: &Captures, name: &str) -> u32 {
    captures
        .name(name)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or_default()
}

/// Rebuild the date from its three numeric fields instead of parsing the
/// page's separators.
fn date_from_captures(captures: &Captures) -> Result<NaiveDate, FormatErrorKind> {
    let month = field(captures, "month");
    let day = field(captures, "day");
    let raw_year = field(captures, "year");
    let year = match captures.name("year").map(|m| m.len()) {
        Some(2) => 2000 + raw_year as i32,
        _ => raw_year as i32,
    };

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(FormatErrorKind::InvalidDate { month, day, year })
}

fn weekday_from_captures(captures: &Captures) -> Result<Weekday, FormatErrorKind> {
    let token = captures.name("weekday").map_or("", |m| m.as_str());
    token
        .parse::<Weekday>()
        .map_err(|_| FormatErrorKind::InvalidWeekday(token.to_string()))
}
