//! Site layouts: where the events live on the page and how they are written.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_EXCLUDE_SELECTOR, DEFAULT_ROOT_SELECTOR, DEFAULT_TOLERANCE_DAYS};
use crate::fragment::AcceptPredicate;
use crate::tokenize::Strategy;

/// One page layout. A new site format is a new `LayoutConfig`, not a new
/// code path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// CSS selector of the element containing the event list
    #[serde(default = "default_root_selector")]
    pub root_selector: String,

    /// CSS selector of a subtree to skip (the list heading). An empty string
    /// turns exclusion off.
    #[serde(default = "default_exclude", skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,

    #[serde(default)]
    pub accept: AcceptPredicate,

    #[serde(default)]
    pub strategy: Strategy,

    #[serde(default = "default_tolerance_days")]
    pub tolerance_days: i64,
}

fn default_root_selector() -> String {
    DEFAULT_ROOT_SELECTOR.to_string()
}

fn default_exclude() -> Option<String> {
    Some(DEFAULT_EXCLUDE_SELECTOR.to_string())
}

fn default_tolerance_days() -> i64 {
    DEFAULT_TOLERANCE_DAYS
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig::month_day_year()
    }
}

impl LayoutConfig {
    /// Dated list: "3/14/24: Pi Day", one line per consecutive day.
    pub fn month_day_year() -> Self {
        LayoutConfig {
            root_selector: default_root_selector(),
            exclude: default_exclude(),
            accept: AcceptPredicate::Text,
            strategy: Strategy::MonthDayYear,
            tolerance_days: default_tolerance_days(),
        }
    }

    /// The exclude selector, if one is set and non-blank.
    pub fn exclude_selector(&self) -> Option<&str> {
        self.exclude
            .as_deref()
            .map(str::trim)
            .filter(|selector| !selector.is_empty())
    }

    /// Weekly list: "Tuesday: Taco Night", one line per paragraph.
    pub fn weekday() -> Self {
        LayoutConfig {
            accept: AcceptPredicate::TextUnder(vec!["p".to_string(), "li".to_string()]),
            strategy: Strategy::Weekday,
            ..LayoutConfig::month_day_year()
        }
    }
}
