//! Notification summarization and delivery.
//!
//! Summarization (what the notification says) is fixed policy here;
//! delivery is a pluggable transport probed at startup, with stdout as the
//! transport of last resort so the text is never lost.

use crate::config::Config;
use crate::data::Alert;
use anyhow::{Context, Result};
use std::process::{Command, Stdio};

/// Alerts spelled out in one notification body before collapsing the rest
/// into a "...and K more" line.
const MAX_BODY_ALERTS: usize = 5;

/// Build the notification title and body for a batch of new alerts.
///
/// Returns `None` for an empty batch: no new alerts, no notification.
pub fn summarize(new_alerts: &[Alert]) -> Option<(String, String)> {
    if new_alerts.is_empty() {
        return None;
    }

    let title = format!(
        "{} New Satellite Alert{}!",
        new_alerts.len(),
        if new_alerts.len() == 1 { "" } else { "s" }
    );

    let mut lines = Vec::new();
    for alert in new_alerts.iter().take(MAX_BODY_ALERTS) {
        let mut line = alert.callsign.clone();
        if let Some(satellite) = &alert.satellite {
            line.push_str(&format!(" • {}", satellite.name));
        }
        if !alert.grids.is_empty() {
            line.push_str(&format!(" • {}", alert.grids.join(", ")));
        }

        let mut details = Vec::new();
        let aos = alert.aos_at.as_deref().map(format_aos).unwrap_or_default();
        if !aos.is_empty() {
            details.push(aos);
        }
        if let Some(mode) = &alert.mode {
            details.push(mode.clone());
        }
        if let Some(mhz) = alert.mhz {
            details.push(format!("{} MHz", mhz));
        }
        if !details.is_empty() {
            line.push_str(&format!("\n  {}", details.join(" ")));
        }

        lines.push(line);
    }

    if new_alerts.len() > MAX_BODY_ALERTS {
        lines.push(format!(
            "...and {} more",
            new_alerts.len() - MAX_BODY_ALERTS
        ));
    }

    Some((title, lines.join("\n")))
}

/// Render an ISO-8601 AOS instant as e.g. "Mar 04 18:30".
///
/// Accepts both a trailing `Z` and an explicit UTC offset. Unparseable
/// input renders as empty, which `summarize` treats as absent.
pub fn format_aos(iso: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(iso) {
        Ok(dt) => dt.format("%b %d %H:%M").to_string(),
        Err(_) => String::new(),
    }
}

/// A delivery transport for one notification.
pub trait Notifier {
    fn display(&self, title: &str, body: &str) -> Result<()>;
    fn name(&self) -> &'static str;
}

/// Linux desktop notifications via `notify-send`.
pub struct NotifySendNotifier;

impl Notifier for NotifySendNotifier {
    fn display(&self, title: &str, body: &str) -> Result<()> {
        let status = Command::new("notify-send")
            .args(["--app-name", "hamwatch", title, body])
            .status()
            .context("Failed to run notify-send")?;

        if !status.success() {
            anyhow::bail!("notify-send exited with {}", status);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "notify-send"
    }
}

/// macOS notification center via `osascript`, with the default alert sound.
pub struct OsaScriptNotifier;

impl Notifier for OsaScriptNotifier {
    fn display(&self, title: &str, body: &str) -> Result<()> {
        let script = format!(
            "display notification \"{}\" with title \"{}\" sound name \"default\"",
            escape_osascript(body),
            escape_osascript(title)
        );

        let status = Command::new("osascript")
            .args(["-e", &script])
            .status()
            .context("Failed to run osascript")?;

        if !status.success() {
            anyhow::bail!("osascript exited with {}", status);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "osascript"
    }
}

/// Transport of last resort: print the notification to stdout. Always
/// succeeds.
pub struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn display(&self, title: &str, body: &str) -> Result<()> {
        println!("{}\n{}", title, body);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "stdout"
    }
}

fn escape_osascript(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Probe for an available desktop transport, falling back to stdout.
pub fn detect(config: &Config) -> Box<dyn Notifier> {
    if !config.notifications.enabled {
        return Box::new(StdoutNotifier);
    }

    if command_available("notify-send") {
        return Box::new(NotifySendNotifier);
    }
    if command_available("osascript") {
        return Box::new(OsaScriptNotifier);
    }

    Box::new(StdoutNotifier)
}

fn command_available(command: &str) -> bool {
    Command::new("which")
        .arg(command)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Deliver a notification, falling back to stdout if the transport errors.
pub fn deliver(notifier: &dyn Notifier, title: &str, body: &str) {
    if let Err(e) = notifier.display(title, body) {
        tracing::warn!("{} delivery failed, printing instead: {}", notifier.name(), e);
        let _ = StdoutNotifier.display(title, body);
    }
}
