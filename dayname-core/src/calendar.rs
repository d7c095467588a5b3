//! Local calendar directory: one all-day .ics file per date.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{DaynameError, DaynameResult};
use crate::event::ValidatedEvent;
use crate::ics::{self, DayEntry};

const SHARED_DATE_SEPARATOR: &str = " / ";

/// Somewhere validated events can be written, keyed by date.
pub trait CalendarSync {
    /// Create the entry for `date`, or retitle the existing one.
    /// Returns true if anything changed.
    fn create_or_update(&self, date: NaiveDate, title: &str) -> DaynameResult<bool>;
}

/// Write every event to the calendar, returning the ones that were new or changed.
///
/// Events landing on the same date (a weekday listed twice) share one entry,
/// titled with their names joined in page order.
pub fn sync_events(
    calendar: &impl CalendarSync,
    events: &[ValidatedEvent],
    today: NaiveDate,
) -> DaynameResult<Vec<ValidatedEvent>> {
    let mut titles: BTreeMap<NaiveDate, Vec<&str>> = BTreeMap::new();
    for event in events {
        titles
            .entry(event.temporal.resolve(today))
            .or_default()
            .push(&event.display_name);
    }

    let mut changed_dates = BTreeSet::new();
    for (date, names) in &titles {
        if calendar.create_or_update(*date, &names.join(SHARED_DATE_SEPARATOR))? {
            changed_dates.insert(*date);
        }
    }

    Ok(events
        .iter()
        .filter(|event| changed_dates.contains(&event.temporal.resolve(today)))
        .cloned()
        .collect())
}

pub struct LocalCalendar {
    slug: String,
    path: PathBuf,
}

impl LocalCalendar {
    /// Open (creating if needed) the calendar stored in `path`.
    /// The directory name doubles as the calendar's slug.
    pub fn open(path: &Path) -> DaynameResult<Self> {
        std::fs::create_dir_all(path)?;

        let slug = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "calendar".to_string());

        Ok(LocalCalendar {
            slug,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn entry_path(&self, date: NaiveDate) -> PathBuf {
        self.path.join(format!("{}.ics", date.format("%Y-%m-%d")))
    }

    fn uid_for(&self, date: NaiveDate) -> String {
        format!("{}@{}", date.format("%Y%m%d"), self.slug)
    }

    /// Read the entry for `date`, if there is one.
    pub fn entry(&self, date: NaiveDate) -> DaynameResult<Option<DayEntry>> {
        let path = self.entry_path(date);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)?;
        let entry = ics::parse_entry(&content)
            .ok_or_else(|| DaynameError::Ics(format!("Could not parse {}", path.display())))?;

        Ok(Some(entry))
    }

    fn create_entry(&self, date: NaiveDate, title: &str) -> DaynameResult<()> {
        let entry = DayEntry {
            uid: self.uid_for(date),
            date,
            summary: title.to_string(),
            description: Some(history_note(title, "created")),
        };

        tracing::info!("Adding event on {}: '{}'", date, title);
        self.save(&entry)
    }

    fn update_entry(&self, mut entry: DayEntry, title: &str) -> DaynameResult<()> {
        tracing::info!(
            "Updating event '{}' on {} with new name '{}'",
            entry.summary,
            entry.date,
            title
        );

        let note = history_note(title, "updated");
        entry.description = Some(match entry.description.take() {
            Some(history) if !history.is_empty() => format!("{history} | {note}"),
            _ => note,
        });
        entry.summary = title.to_string();

        self.save(&entry)
    }

    fn save(&self, entry: &DayEntry) -> DaynameResult<()> {
        let path = self.entry_path(entry.date);
        let temp = path.with_extension("ics.tmp");

        std::fs::write(&temp, ics::generate_ics(entry))?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }
}

impl CalendarSync for LocalCalendar {
    fn create_or_update(&self, date: NaiveDate, title: &str) -> DaynameResult<bool> {
        match self.entry(date)? {
            None => {
                self.create_entry(date, title)?;
                Ok(true)
            }
            Some(entry) if entry.summary == title => Ok(false),
            Some(entry) => {
                self.update_entry(entry, title)?;
                Ok(true)
            }
        }
    }
}

impl fmt::Display for LocalCalendar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.slug)
    }
}

fn history_note(title: &str, action: &str) -> String {
    format!(
        "'{}' {}: {}",
        title,
        action,
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    )
}
