//! Run-level composition: one full check from feed fetch to summary line.

use crate::config::Config;
use crate::{diff, feed, notify, store};
use anyhow::{Context, Result};

/// Execute a single check against the feed.
///
/// Ordering matters: the seen-set is loaded before the fetch, newly
/// notified ids are recorded before pruning, and the state file is only
/// written after a successful fetch. A failed fetch therefore leaves the
/// persisted state untouched.
pub async fn run(config: &Config) -> Result<()> {
    let mut seen = store::load(config);

    let current = feed::fetch_upcoming(config)
        .await
        .context("Failed to fetch alerts")?;

    let new = diff::find_new(&current, &seen);

    if let Some((title, body)) = notify::summarize(&new) {
        let notifier = notify::detect(config);
        notify::deliver(notifier.as_ref(), &title, &body);
        tracing::info!("Notified about {} new alerts", new.len());
    } else {
        tracing::info!("No new alerts found");
    }

    seen.extend(new.iter().map(|alert| alert.id.clone()));
    seen = diff::prune(&seen, &current);

    if let Err(e) = store::save(config, &seen) {
        tracing::warn!("Failed to persist seen alerts: {:#}", e);
    }

    println!(
        "Total alerts: {}, New: {}, Tracking: {}",
        current.len(),
        new.len(),
        seen.len()
    );

    Ok(())
}
