//! Seen-set persistence: round-trips, corruption recovery, and the reset
//! flag.

use hamwatch::config::{Config, FeedConfig, NotificationConfig, StateConfig};
use hamwatch::data::AlertId;
use hamwatch::store;
use std::collections::HashSet;
use std::path::PathBuf;
use tempfile::TempDir;

mod helpers {
    use super::*;

    pub fn id_set(ids: &[&str]) -> HashSet<AlertId> {
        ids.iter().map(|id| AlertId::new(*id)).collect()
    }

    pub fn config_with_state(path: PathBuf, reset: bool) -> Config {
        Config {
            api_key: "test-key".to_string(),
            feed: FeedConfig::default(),
            state: StateConfig { path: Some(path) },
            notifications: NotificationConfig::default(),
            reset,
        }
    }

    pub fn state_path(dir: &TempDir) -> PathBuf {
        dir.path().join("seen_alerts.json")
    }
}

#[test]
fn test_load_missing_file_is_empty() {
    let dir = TempDir::new().unwrap();

    let seen = store::load_from_path(&helpers::state_path(&dir));

    assert!(seen.is_empty());
}

#[test]
fn test_save_then_load_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = helpers::state_path(&dir);
    let seen = helpers::id_set(&["a", "b", "c"]);

    store::save_to_path(&path, &seen).unwrap();

    assert_eq!(store::load_from_path(&path), seen);
}

#[test]
fn test_save_of_loaded_set_is_a_fixed_point() {
    let dir = TempDir::new().unwrap();
    let path = helpers::state_path(&dir);
    let seen = helpers::id_set(&["1", "2", "3"]);

    store::save_to_path(&path, &seen).unwrap();
    let loaded = store::load_from_path(&path);
    store::save_to_path(&path, &loaded).unwrap();

    // Element order inside the array may differ between writes; the parsed
    // contents must not.
    assert_eq!(store::load_from_path(&path), seen);
}

#[test]
fn test_corrupt_file_loads_as_empty() {
    let dir = TempDir::new().unwrap();
    let path = helpers::state_path(&dir);
    std::fs::write(&path, "this is {{{ not json").unwrap();

    let seen = store::load_from_path(&path);

    assert!(seen.is_empty());
}

#[test]
fn test_wrong_shape_loads_as_empty() {
    let dir = TempDir::new().unwrap();
    let path = helpers::state_path(&dir);
    std::fs::write(&path, r#"{"seen": ["a"]}"#).unwrap();

    assert!(store::load_from_path(&path).is_empty());
}

#[test]
fn test_integer_ids_load_as_their_string_form() {
    let dir = TempDir::new().unwrap();
    let path = helpers::state_path(&dir);
    std::fs::write(&path, "[1, 2, 3]").unwrap();

    let seen = store::load_from_path(&path);

    assert_eq!(seen, helpers::id_set(&["1", "2", "3"]));
}

#[test]
fn test_save_overwrites_previous_contents() {
    let dir = TempDir::new().unwrap();
    let path = helpers::state_path(&dir);

    store::save_to_path(&path, &helpers::id_set(&["a", "b", "c"])).unwrap();
    store::save_to_path(&path, &helpers::id_set(&["b"])).unwrap();

    assert_eq!(store::load_from_path(&path), helpers::id_set(&["b"]));
}

#[test]
fn test_save_creates_missing_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("state").join("seen.json");

    store::save_to_path(&path, &helpers::id_set(&["x"])).unwrap();

    assert_eq!(store::load_from_path(&path), helpers::id_set(&["x"]));
}

#[test]
fn test_reset_flag_ignores_persisted_state() {
    let dir = TempDir::new().unwrap();
    let path = helpers::state_path(&dir);
    store::save_to_path(&path, &helpers::id_set(&["a", "b"])).unwrap();

    let config = helpers::config_with_state(path.clone(), true);
    assert!(store::load(&config).is_empty());

    // Without the flag the same file loads normally.
    let config = helpers::config_with_state(path, false);
    assert_eq!(store::load(&config), helpers::id_set(&["a", "b"]));
}

#[test]
fn test_load_uses_configured_state_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom-location.json");
    store::save_to_path(&path, &helpers::id_set(&["z"])).unwrap();

    let config = helpers::config_with_state(path.clone(), false);

    assert_eq!(store::state_file_path(&config).unwrap(), path);
    assert_eq!(store::load(&config), helpers::id_set(&["z"]));
}
