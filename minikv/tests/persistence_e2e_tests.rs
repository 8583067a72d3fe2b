// End-to-end persistence tests: the log survives a "restart" (drop and
// reopen of the store) and replays back to the same state

use minikv::config::Config;
use minikv::persistence::{PersistenceError, WalConfig};
use minikv::session::AppState;
use std::path::Path;

fn config_at(dir: &Path) -> Config {
    Config {
        storage: WalConfig {
            path: dir.join("data.log"),
            ..WalConfig::default()
        },
        ..Config::default()
    }
}

#[test]
fn test_restart_replays_state() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_at(dir.path());

    {
        let mut state = AppState::open(&config).unwrap();
        state.set("user:1", "alice").unwrap();
        state.set("user:2", "bob").unwrap();
    }

    let state = AppState::open(&config).unwrap();
    assert_eq!(state.get("user:1"), Some("alice".to_string()));
    assert_eq!(state.get("user:2"), Some("bob".to_string()));
}

#[test]
fn test_value_with_spaces_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_at(dir.path());

    {
        let mut state = AppState::open(&config).unwrap();
        state.set("x", "hello world").unwrap();
    }

    let state = AppState::open(&config).unwrap();
    assert_eq!(state.get("x"), Some("hello world".to_string()));
}

#[test]
fn test_last_write_wins_across_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_at(dir.path());

    {
        let mut state = AppState::open(&config).unwrap();
        state.set("name", "alice").unwrap();
        state.set("name", "bob").unwrap();
        assert_eq!(state.get("name"), Some("bob".to_string()));
    }

    let state = AppState::open(&config).unwrap();
    assert_eq!(state.get("name"), Some("bob".to_string()));
}

#[test]
fn test_failed_append_leaves_cache_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_at(dir.path());

    let mut state = AppState::open(&config).unwrap();
    let err = state.set("bad key", "value").unwrap_err();
    assert!(matches!(err, PersistenceError::InvalidKey(_)));

    // Nothing was applied, and nothing reached the disk
    assert_eq!(state.get("bad"), None);
    assert!(state.kv_store.is_empty());
    let on_disk = std::fs::read_to_string(dir.path().join("data.log")).unwrap();
    assert!(on_disk.is_empty());
}

#[test]
fn test_absent_key_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::open(&config_at(dir.path())).unwrap();

    assert_eq!(state.get("nope"), None);
}

#[test]
fn test_recovery_tolerates_garbage_in_log() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_at(dir.path());

    std::fs::write(&config.storage.path, "SET a 1\nGARBAGE\nSET b 2\n").unwrap();

    let state = AppState::open(&config).unwrap();
    assert_eq!(state.get("a"), Some("1".to_string()));
    assert_eq!(state.get("b"), Some("2".to_string()));
    assert_eq!(state.kv_store.len(), 2);
}

#[test]
fn test_writes_append_to_existing_log() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_at(dir.path());

    {
        let mut state = AppState::open(&config).unwrap();
        state.set("a", "1").unwrap();
    }
    {
        let mut state = AppState::open(&config).unwrap();
        state.set("b", "2").unwrap();
    }

    // The log is append-only: both writes are present, in order
    let on_disk = std::fs::read_to_string(&config.storage.path).unwrap();
    assert_eq!(on_disk, "SET a 1\nSET b 2\n");
}

#[test]
fn test_ephemeral_state_does_not_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_at(dir.path());
    config.storage.enabled = false;

    {
        let mut state = AppState::open(&config).unwrap();
        assert!(!state.is_durable());
        state.set("k", "v").unwrap();
        assert_eq!(state.get("k"), Some("v".to_string()));
    }

    let state = AppState::open(&config).unwrap();
    assert_eq!(state.get("k"), None);
}
