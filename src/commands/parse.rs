use std::path::Path;

use anyhow::Result;
use dayname_core::config::DaynameConfig;

use crate::fetch::load_page;
use crate::render::render_events;

/// Extract and print the events, writing nothing.
pub async fn run(config: &DaynameConfig, file: Option<&Path>) -> Result<()> {
    let html = load_page(config, file).await?;
    let events = config.pipeline()?.extract(&html, config.today()?)?;

    println!("Found {} events:", events.len());
    println!("{}", render_events(&events));

    Ok(())
}
