// In-memory preference store using DashMap
use crate::domain::error::AppError;
use crate::domain::traits::PreferenceStore;
use dashmap::DashMap;

/// Thread-safe in-memory preferences
///
/// Used on its own when nothing should touch the disk, and as the working copy
/// behind [`super::prefs::FilePreferenceStore`].
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    map: DashMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            map: entries.into_iter().collect(),
        }
    }

    pub fn entries(&self) -> Vec<(String, String)> {
        let mut entries: Vec<_> = self
            .map
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        entries.sort();
        entries
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).map(|entry| entry.value().clone())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        self.map.remove(key);
        Ok(())
    }
}
