//! HTML in, validated events out.

use chrono::NaiveDate;
use scraper::{Html, Selector};

use crate::error::{DaynameError, DaynameResult};
use crate::event::{RawEventRecord, ValidatedEvent};
use crate::fragment::{self, Acceptance};
use crate::layout::LayoutConfig;
use crate::title::TitleRules;
use crate::tokenize::Tokenizer;
use crate::validate::Validator;

/// A layout with its selectors and patterns compiled, ready to run on pages.
#[derive(Debug, Clone)]
pub struct Pipeline {
    root_selector: String,
    root: Selector,
    acceptance: Acceptance,
    tokenizer: Tokenizer,
    validator: Validator,
}

fn parse_selector(selector: &str) -> DaynameResult<Selector> {
    Selector::parse(selector).map_err(|e| DaynameError::Selector(format!("{selector}: {e:?}")))
}

impl Pipeline {
    pub fn new(layout: &LayoutConfig, titles: &TitleRules) -> DaynameResult<Self> {
        let exclude = layout.exclude_selector().map(parse_selector).transpose()?;

        Ok(Pipeline {
            root_selector: layout.root_selector.clone(),
            root: parse_selector(&layout.root_selector)?,
            acceptance: Acceptance::new(layout.accept.clone(), exclude),
            tokenizer: Tokenizer::new(layout.strategy)?,
            validator: Validator::new(layout.strategy, layout.tolerance_days, titles.clone()),
        })
    }

    /// Extract every event from the page, or fail without partial output.
    pub fn extract(&self, html: &str, today: NaiveDate) -> DaynameResult<Vec<ValidatedEvent>> {
        let document = Html::parse_document(html);

        let root = document
            .select(&self.root)
            .next()
            .ok_or_else(|| DaynameError::RootNotFound(self.root_selector.clone()))?;

        let fragments = fragment::walk(*root, |node| self.acceptance.accepts(node));
        tracing::debug!("Found {} text fragments", fragments.len());

        let records = fragments
            .iter()
            .map(|fragment| self.tokenizer.tokenize(fragment))
            .collect::<Result<Vec<RawEventRecord>, _>>()?;

        let events = self.validator.validate(records, today)?;
        tracing::debug!("Parsed {} events from page", events.len());

        Ok(events)
    }
}
