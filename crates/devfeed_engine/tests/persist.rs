use std::fs;

use devfeed_core::{ThemeContext, ThemeId};
use devfeed_engine::{ensure_state_dir, ThemeStore, PREFERENCES_FILE};
use tempfile::TempDir;

#[test]
fn creates_missing_state_dir() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("state");
    assert!(!dir.exists());
    ensure_state_dir(&dir).unwrap();
    assert!(dir.is_dir());
}

#[test]
fn saved_theme_round_trips_through_context_init() {
    let temp = TempDir::new().unwrap();
    let store = ThemeStore::new(temp.path().join("state"));
    assert_eq!(store.load(), None);

    let path = store.save(ThemeId::Moss).unwrap();
    assert_eq!(path.file_name().unwrap(), PREFERENCES_FILE);

    let restored = ThemeContext::init(store.load().as_deref());
    assert_eq!(restored.current_id(), ThemeId::Moss);

    store.save(ThemeId::Honey).unwrap();
    assert_eq!(store.load().as_deref(), Some("honey"));
}

#[test]
fn corrupt_file_reads_as_no_preference() {
    let temp = TempDir::new().unwrap();
    let store = ThemeStore::new(temp.path());
    fs::write(store.path(), "not ron at all {{").unwrap();

    assert_eq!(store.load(), None);
    assert_eq!(ThemeContext::init(store.load().as_deref()).current_id(), ThemeId::Breeze);
}

#[test]
fn save_fails_when_state_dir_is_a_file() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let store = ThemeStore::new(&file_path);
    assert!(store.save(ThemeId::Ruby).is_err());
    assert_eq!(fs::read_to_string(&file_path).unwrap(), "x");
}
