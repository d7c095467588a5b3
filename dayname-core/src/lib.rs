//! Core of dayname: scrape a hand-maintained list of named days, repair the
//! usual typos and hand back a validated, consecutive sequence of events.
//!
//! - `fragment`, `tokenize` and `validate` are the three pipeline stages
//! - `pipeline` runs them on an HTML page for one `layout`
//! - `calendar`, `ics` and `notify` are where the results go

pub mod calendar;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod fragment;
pub mod ics;
pub mod layout;
pub mod notify;
pub mod pipeline;
pub mod title;
pub mod tokenize;
pub mod validate;

// Re-export the pipeline types at crate root for convenience
pub use error::{DataInconsistency, DaynameError, DaynameResult, FormatError, FormatErrorKind};
pub use event::{RawEventRecord, Temporal, ValidatedEvent};
pub use pipeline::Pipeline;
