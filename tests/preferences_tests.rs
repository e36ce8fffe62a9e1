//! 主题偏好持久化测试

use hnai::application::preferences::ThemeController;
use hnai::domain::traits::PreferenceStore;
use hnai::infrastructure::storage::prefs::FilePreferenceStore;
use hnai::presentation::theme::{ThemeName, THEME_STORAGE_KEY};
use std::sync::Arc;

#[test]
fn test_theme_survives_reopening() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("preferences.json");

    let store = Arc::new(FilePreferenceStore::open(&path));
    let mut themes = ThemeController::load(store, ThemeName::Default);
    assert_eq!(themes.toggle().unwrap(), ThemeName::Light);
    assert_eq!(themes.toggle().unwrap(), ThemeName::Dark);
    assert!(path.exists());

    let reopened = Arc::new(FilePreferenceStore::open(&path));
    assert_eq!(reopened.get(THEME_STORAGE_KEY).as_deref(), Some("dark"));
    let themes = ThemeController::load(reopened, ThemeName::Light);
    assert_eq!(themes.current(), ThemeName::Dark);
}

#[test]
fn test_reset_forgets_the_preference() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.json");

    let store = Arc::new(FilePreferenceStore::open(&path));
    store.set("other", "kept").unwrap();
    let mut themes = ThemeController::load(store, ThemeName::Default);
    themes.toggle().unwrap();
    assert_eq!(themes.reset().unwrap(), ThemeName::Default);

    let reopened = FilePreferenceStore::open(&path);
    assert_eq!(reopened.get(THEME_STORAGE_KEY), None);
    assert_eq!(reopened.get("other").as_deref(), Some("kept"));
}

#[test]
fn test_corrupt_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = Arc::new(FilePreferenceStore::open(&path));
    assert_eq!(store.get(THEME_STORAGE_KEY), None);
    let themes = ThemeController::load(store.clone(), ThemeName::Default);
    assert_eq!(themes.current(), ThemeName::Default);

    store.set(THEME_STORAGE_KEY, "light").unwrap();
    let reopened = FilePreferenceStore::open(&path);
    assert_eq!(reopened.get(THEME_STORAGE_KEY).as_deref(), Some("light"));
}
