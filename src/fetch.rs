//! Getting the page HTML, from the network or from a saved file.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use dayname_core::config::{DaynameConfig, FetchConfig};

use crate::utils::tui::create_spinner;

/// First retry waits this long, doubling on each further attempt
const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

/// Upper bound for a single retry wait
const RETRY_MAX_DELAY: Duration = Duration::from_secs(60);

pub async fn load_page(config: &DaynameConfig, file: Option<&Path>) -> Result<String> {
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read page from {}", path.display()));
    }

    let spinner = create_spinner(format!("Fetching {}", config.url));
    let result = fetch_page(&config.url, &config.fetch).await;
    spinner.finish_and_clear();

    result
}

async fn fetch_page(url: &str, settings: &FetchConfig) -> Result<String> {
    let client = reqwest::Client::builder()
        .timeout(settings.timeout()?)
        .build()
        .context("Failed to build HTTP client")?;

    let mut attempt = 0;
    loop {
        match try_fetch(&client, url).await {
            Ok(body) => {
                tracing::debug!("Fetched {} bytes from {}", body.len(), url);
                return Ok(body);
            }
            Err(e) if attempt < settings.retries => {
                let delay = retry_delay(attempt);
                tracing::debug!(
                    "Retry invoked. Current retry count: {}. Error: {}",
                    attempt + 1,
                    e
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to fetch {} after {} attempts", url, attempt + 1)
                });
            }
        }
    }
}

async fn try_fetch(client: &reqwest::Client, url: &str) -> reqwest::Result<String> {
    client.get(url).send().await?.error_for_status()?.text().await
}

fn retry_delay(attempt: u32) -> Duration {
    RETRY_BASE_DELAY
        .saturating_mul(2u32.saturating_pow(attempt))
        .min(RETRY_MAX_DELAY)
}
