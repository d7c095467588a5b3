use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use dayname_core::calendar::{LocalCalendar, sync_events};
use dayname_core::config::DaynameConfig;
use dayname_core::notify::{ERROR_SUBJECT, ErrorThrottle, Notifier, OutboxNotifier, notify_changes};
use owo_colors::OwoColorize;

use crate::fetch::load_page;
use crate::render::render_events;

pub async fn run(config: &DaynameConfig, file: Option<&Path>, dry_run: bool) -> Result<()> {
    tracing::debug!("Checking...");

    let result = check(config, file, dry_run).await;
    if let Err(ref e) = result {
        report_error(config, e);
    }

    tracing::debug!("Check complete.");
    result
}

async fn check(config: &DaynameConfig, file: Option<&Path>, dry_run: bool) -> Result<()> {
    let html = load_page(config, file).await?;
    let today = config.today()?;
    let events = config.pipeline()?.extract(&html, today)?;

    println!("Found {} events:", events.len());
    println!("{}", render_events(&events));

    if dry_run {
        println!("\n{}", "Dry run, calendar not updated".dimmed());
        return Ok(());
    }

    let calendar = LocalCalendar::open(&config.calendar_path())?;
    let changed = sync_events(&calendar, &events, today)?;

    let outbox = OutboxNotifier::new(&config.outbox_path());
    notify_changes(&outbox, &changed)?;

    if changed.is_empty() {
        println!("\n📅 {}: no changes", calendar);
    } else {
        println!("\n📅 {}: {} new or changed", calendar, changed.len());
        println!("{}", render_events(&changed));
    }

    Ok(())
}

/// Queue an error notice, at most once per configured interval.
pub fn report_error(config: &DaynameConfig, error: &anyhow::Error) {
    tracing::error!("Check failed: {:#}", error);

    let interval = match config.error_notice_interval() {
        Ok(interval) => interval,
        Err(e) => {
            tracing::error!("{}", e);
            return;
        }
    };

    let throttle = ErrorThrottle::new(&config.state_path(), interval);
    if !throttle.should_send(Utc::now()) {
        tracing::debug!("Error notice already sent recently, not sending another");
        return;
    }

    let body = format!("Error message: Check failed!\nError: {:?}", error);
    if let Err(e) = OutboxNotifier::new(&config.outbox_path()).notify_error(ERROR_SUBJECT, &body) {
        tracing::error!("Failed to queue error notice: {}", e);
    }
}
