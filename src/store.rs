//! Persisted seen-set: ids of alerts already notified about.
//!
//! Stored as a JSON array of id strings in the user data directory and
//! rewritten in full at the end of every run. Losing this file only causes
//! re-notification on the next run, so every failure here degrades to the
//! empty set or a logged warning instead of failing the process.

use crate::config::Config;
use crate::data::AlertId;
use anyhow::{Context, Result};
use fs2::FileExt;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Resolve the seen-set file location: config override, else the per-user
/// data directory.
pub fn state_file_path(config: &Config) -> Result<PathBuf> {
    if let Some(path) = &config.state.path {
        return Ok(path.clone());
    }

    let data_dir = directories::ProjectDirs::from("com", "hamwatch", "hamwatch")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?
        .data_dir()
        .to_path_buf();

    Ok(data_dir.join("seen_alerts.json"))
}

/// Load the persisted seen-set.
///
/// A requested reset skips the file entirely. A missing, unreadable, or
/// corrupt file yields the empty set; corruption is no worse than having no
/// prior state.
pub fn load(config: &Config) -> HashSet<AlertId> {
    if config.reset {
        tracing::info!("Reset requested: clearing all seen alerts");
        return HashSet::new();
    }

    let path = match state_file_path(config) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!("Could not resolve seen-alert state location: {}", e);
            return HashSet::new();
        }
    };

    load_from_path(&path)
}

/// Load a seen-set from a specific path (also used by tests).
pub fn load_from_path(path: &Path) -> HashSet<AlertId> {
    if !path.exists() {
        return HashSet::new();
    }

    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read seen alerts from {}: {}", path.display(), e);
            return HashSet::new();
        }
    };

    match serde_json::from_str(&content) {
        Ok(ids) => ids,
        Err(e) => {
            tracing::warn!(
                "Ignoring corrupt seen-alert state at {}: {}",
                path.display(),
                e
            );
            HashSet::new()
        }
    }
}

/// Persist the seen-set, replacing any previous contents.
///
/// The caller treats failure as non-fatal; the next run simply re-notifies.
pub fn save(config: &Config, seen: &HashSet<AlertId>) -> Result<()> {
    let path = state_file_path(config)?;
    save_to_path(&path, seen)
}

/// Persist a seen-set to a specific path (also used by tests).
///
/// Full overwrite under an exclusive lock, never an incremental append.
pub fn save_to_path(path: &Path, seen: &HashSet<AlertId>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to open {} for writing", path.display()))?;
    file.lock_exclusive()?;

    let content = serde_json::to_string(seen)?;
    let mut writer = std::io::BufWriter::new(&file);
    writer.write_all(content.as_bytes())?;
    writer.flush()?;

    file.unlock()?;

    Ok(())
}
