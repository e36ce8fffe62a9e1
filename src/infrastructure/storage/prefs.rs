use super::memory::MemoryPreferenceStore;
use crate::domain::error::AppError;
use crate::domain::traits::PreferenceStore;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Preferences persisted as a flat JSON object, rewritten on every change.
pub struct FilePreferenceStore {
    path: PathBuf,
    values: MemoryPreferenceStore,
}

impl FilePreferenceStore {
    /// Open the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match read_entries(&path) {
            Ok(entries) => MemoryPreferenceStore::from_entries(entries),
            Err(e) => {
                warn!(path = %path.display(), "Ignoring unreadable preferences: {}", e);
                MemoryPreferenceStore::new()
            }
        };
        Self { path, values }
    }

    fn flush(&self) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let map: BTreeMap<String, String> = self.values.entries().into_iter().collect();
        fs::write(&self.path, serde_json::to_string_pretty(&map)?)?;
        Ok(())
    }
}

fn read_entries(path: &Path) -> Result<BTreeMap<String, String>, AppError> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.values.set(key, value)?;
        self.flush()
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        self.values.remove(key)?;
        self.flush()
    }
}
