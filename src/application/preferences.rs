use crate::domain::error::AppError;
use crate::domain::traits::PreferenceStore;
use crate::presentation::theme::{ThemeName, THEME_STORAGE_KEY};
use std::sync::Arc;
use tracing::{debug, warn};

/// Current theme plus its persisted copy.
pub struct ThemeController {
    store: Arc<dyn PreferenceStore>,
    current: ThemeName,
}

impl ThemeController {
    /// Stored preference first, then `fallback`. Unknown stored names mean default.
    pub fn load(store: Arc<dyn PreferenceStore>, fallback: ThemeName) -> Self {
        let current = match store.get(THEME_STORAGE_KEY) {
            Some(stored) => ThemeName::parse(&stored).unwrap_or_else(|| {
                warn!(stored = %stored, "Unknown stored theme, using default");
                ThemeName::Default
            }),
            None => fallback,
        };
        Self { store, current }
    }

    /// Start on `theme` for this run without touching the stored preference.
    pub fn with_override(store: Arc<dyn PreferenceStore>, theme: ThemeName) -> Self {
        Self {
            store,
            current: theme,
        }
    }

    pub fn current(&self) -> ThemeName {
        self.current
    }

    pub fn toggle(&mut self) -> Result<ThemeName, AppError> {
        self.set(self.current.next())
    }

    pub fn set(&mut self, theme: ThemeName) -> Result<ThemeName, AppError> {
        self.store.set(THEME_STORAGE_KEY, theme.as_str())?;
        self.current = theme;
        debug!(theme = %theme, "Theme saved");
        Ok(theme)
    }

    /// Back to the baseline theme and forget the stored preference.
    pub fn reset(&mut self) -> Result<ThemeName, AppError> {
        self.store.remove(THEME_STORAGE_KEY)?;
        self.current = ThemeName::Default;
        Ok(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::memory::MemoryPreferenceStore;

    #[test]
    fn absent_preference_uses_fallback() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let themes = ThemeController::load(store, ThemeName::Dark);
        assert_eq!(themes.current(), ThemeName::Dark);
    }

    #[test]
    fn toggle_persists_and_reset_removes() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let mut themes = ThemeController::load(store.clone(), ThemeName::Default);

        assert_eq!(themes.toggle().unwrap(), ThemeName::Light);
        assert_eq!(store.get(THEME_STORAGE_KEY).as_deref(), Some("light"));

        themes.reset().unwrap();
        assert_eq!(themes.current(), ThemeName::Default);
        assert_eq!(store.get(THEME_STORAGE_KEY), None);
    }

    struct ReadOnlyStore;

    impl PreferenceStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Option<String> {
            Some("dark".to_string())
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), AppError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }

        fn remove(&self, _key: &str) -> Result<(), AppError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }
    }

    #[test]
    fn failed_save_keeps_the_shown_theme() {
        let mut themes = ThemeController::load(Arc::new(ReadOnlyStore), ThemeName::Default);
        assert_eq!(themes.current(), ThemeName::Dark);

        assert!(matches!(themes.toggle(), Err(AppError::Io(_))));
        assert_eq!(themes.current(), ThemeName::Dark);
        assert!(themes.reset().is_err());
        assert_eq!(themes.current(), ThemeName::Dark);
    }

    #[test]
    fn override_is_not_persisted() {
        let store = Arc::new(MemoryPreferenceStore::new());
        store.set(THEME_STORAGE_KEY, "light").unwrap();
        let themes = ThemeController::with_override(store.clone(), ThemeName::Dark);
        assert_eq!(themes.current(), ThemeName::Dark);
        assert_eq!(store.get(THEME_STORAGE_KEY).as_deref(), Some("light"));
    }

    #[test]
    fn garbage_preference_falls_back_to_default() {
        let store = Arc::new(MemoryPreferenceStore::new());
        store.set(THEME_STORAGE_KEY, "neon").unwrap();
        let themes = ThemeController::load(store, ThemeName::Dark);
        assert_eq!(themes.current(), ThemeName::Default);
    }
}
