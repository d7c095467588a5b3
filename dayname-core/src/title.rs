//! Calendar title canonicalization.

use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE_PREFIX: &str = "IYD: ";

/// Maps any name containing `contains` to the fixed `title`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleRule {
    pub contains: String,
    pub title: String,
}

/// Turns a scraped event name into the title used on the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleRules {
    #[serde(default = "default_prefix")]
    pub prefix: String,

    #[serde(default = "default_rules")]
    pub rules: Vec<TitleRule>,
}

fn default_prefix() -> String {
    DEFAULT_TITLE_PREFIX.to_string()
}

fn default_rules() -> Vec<TitleRule> {
    vec![TitleRule {
        contains: "Gourmet Night".to_string(),
        title: "FP Gourmet Night".to_string(),
    }]
}

impl Default for TitleRules {
    fn default() -> Self {
        TitleRules {
            prefix: default_prefix(),
            rules: default_rules(),
        }
    }
}

impl TitleRules {
    /// First matching rule wins; unmatched names get the prefix.
    pub fn canonicalize(&self, name: &str) -> String {
        let name = name.trim();

        match self.rules.iter().find(|rule| name.contains(&rule.contains)) {
            Some(rule) => rule.title.clone(),
            None => format!("{}{}", self.prefix, name),
        }
    }
}
