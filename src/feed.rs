//! Client for the upcoming-alerts feed.

use crate::config::Config;
use crate::data::Alert;
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::time::Duration;

/// Shared HTTP client with a bounded request timeout so a dead feed cannot
/// hang the run indefinitely.
pub static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .expect("Failed to create HTTP client")
});

/// Feed response envelope: alerts live in a top-level `data` array.
#[derive(Debug, Deserialize)]
struct FeedResponse {
    data: Vec<Alert>,
}

/// Fetch the feed's current window of upcoming alerts.
///
/// Any failure aborts the run upstream; this path never touches the
/// persisted seen-set.
pub async fn fetch_upcoming(config: &Config) -> Result<Vec<Alert>> {
    let response = HTTP_CLIENT
        .get(&config.feed.url)
        .header("Authorization", format!("Bearer {}", config.api_key))
        .send()
        .await
        .with_context(|| format!("Failed to reach alert feed at {}", config.feed.url))?;

    if !response.status().is_success() {
        anyhow::bail!("Alert feed returned {}", response.status());
    }

    let body: FeedResponse = response
        .json()
        .await
        .context("Failed to parse alert feed response")?;

    Ok(body.data)
}
