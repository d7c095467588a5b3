//! Notifications about new or changed days, and about failed runs.
//!
//! Messages are dropped into an outbox directory as plain-text files with a
//! `Subject:` header; delivering them is left to whatever watches the outbox.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::DaynameResult;
use crate::event::ValidatedEvent;

pub const UPDATE_SUBJECT: &str = "IYD Update Notification";
pub const ERROR_SUBJECT: &str = "IYD Notifier Error";

const LAST_ERROR_NOTICE_FILE: &str = "last_error_notice";

pub trait Notifier {
    fn notify_update(&self, subject: &str, body: &str) -> DaynameResult<()>;
    fn notify_error(&self, subject: &str, body: &str) -> DaynameResult<()>;
}

/// One line per event, in page order. Empty when nothing changed.
pub fn render_update_body(events: &[ValidatedEvent]) -> String {
    events
        .iter()
        .map(|event| format!("{event}\n"))
        .collect()
}

/// Send the update notice, unless there is nothing to report.
/// Returns true if a notice was sent.
pub fn notify_changes(notifier: &impl Notifier, changed: &[ValidatedEvent]) -> DaynameResult<bool> {
    if changed.is_empty() {
        tracing::debug!("No new or changed events, not sending a notification");
        return Ok(false);
    }

    notifier.notify_update(UPDATE_SUBJECT, &render_update_body(changed))?;
    Ok(true)
}

pub struct OutboxNotifier {
    dir: PathBuf,
}

impl OutboxNotifier {
    pub fn new(dir: &Path) -> Self {
        OutboxNotifier {
            dir: dir.to_path_buf(),
        }
    }

    fn write(&self, kind: &str, subject: &str, body: &str) -> DaynameResult<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;

        let stamp = Utc::now().format("%Y%m%dT%H%M%S%.3fZ");
        let path = self.dir.join(format!("{stamp}-{kind}.txt"));
        std::fs::write(&path, format!("Subject: {subject}\n\n{body}"))?;

        Ok(path)
    }
}

impl Notifier for OutboxNotifier {
    fn notify_update(&self, subject: &str, body: &str) -> DaynameResult<()> {
        let path = self.write("update", subject, body)?;
        tracing::info!("Queued update notification {}", path.display());
        Ok(())
    }

    fn notify_error(&self, subject: &str, body: &str) -> DaynameResult<()> {
        let path = self.write("error", subject, body)?;
        tracing::info!("Queued error notification {}", path.display());
        Ok(())
    }
}

/// Limits error notices to one per interval, so a broken page doesn't
/// produce a notice on every scheduled run.
pub struct ErrorThrottle {
    state_dir: PathBuf,
    interval: Duration,
}

impl ErrorThrottle {
    pub fn new(state_dir: &Path, interval: Duration) -> Self {
        ErrorThrottle {
            state_dir: state_dir.to_path_buf(),
            interval,
        }
    }

    fn path(&self) -> PathBuf {
        self.state_dir.join(LAST_ERROR_NOTICE_FILE)
    }

    fn last_sent(&self) -> Option<DateTime<Utc>> {
        let content = std::fs::read_to_string(self.path()).ok()?;
        DateTime::parse_from_rfc3339(content.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Whether a notice may go out at `now`. When it may, `now` is recorded
    /// as the last notice time.
    pub fn should_send(&self, now: DateTime<Utc>) -> bool {
        let interval = chrono::Duration::from_std(self.interval).unwrap_or(chrono::Duration::MAX);

        let send = match self.last_sent() {
            None => true,
            Some(last) => last
                .checked_add_signed(interval)
                .is_some_and(|next| now >= next),
        };

        if send {
            if let Err(e) = self.record(now) {
                tracing::error!("Error trying to save error notice state: {}", e);
            }
        }

        send
    }

    fn record(&self, now: DateTime<Utc>) -> DaynameResult<()> {
        std::fs::create_dir_all(&self.state_dir)?;
        std::fs::write(self.path(), now.to_rfc3339())?;
        Ok(())
    }
}
