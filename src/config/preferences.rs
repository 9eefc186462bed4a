//! Key/value preference storage (the portal's equivalent of browser local storage).

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use std::fs;
use std::sync::{PoisonError, RwLock};

/// String preferences that outlive a single session.
///
/// Reads never fail: a store that cannot produce a value reports it as missing.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Preferences kept in a YAML map on disk.
///
/// The whole file is loaded once at construction and rewritten on every `set`.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: Utf8PathBuf,
    values: RwLock<IndexMap<String, String>>,
}

impl FilePreferenceStore {
    /// Open the store at `path`, starting empty if the file does not exist yet.
    pub fn open<P: AsRef<Utf8Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let values = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read preferences: {}", path))?;

            if contents.trim().is_empty() {
                IndexMap::new()
            } else {
                serde_yaml_ng::from_str(&contents)
                    .with_context(|| format!("Failed to parse preferences: {}", path))?
            }
        } else {
            tracing::debug!("No preferences at {}, starting empty", path);
            IndexMap::new()
        };

        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());

        let yaml = serde_yaml_ng::to_string(&*values)
            .context("Failed to serialize preferences to YAML")?;
        fs::write(&self.path, yaml)
            .with_context(|| format!("Failed to write preferences: {}", self.path))?;

        tracing::debug!("Stored preference {}={} in {}", key, value, self.path);
        Ok(())
    }
}

/// Process-local preferences, used by tests and headless sessions
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: RwLock<IndexMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        store
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_persists_across_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(temp_dir.path().join("Preferences.yaml")).unwrap();

        let store = FilePreferenceStore::open(&path).unwrap();
        assert_eq!(store.get("theme"), None);
        store.set("theme", "dark").unwrap();

        let reopened = FilePreferenceStore::open(&path).unwrap();
        assert_eq!(reopened.get("theme"), Some("dark".to_string()));
    }

    #[test]
    fn test_file_store_rejects_garbage() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(temp_dir.path().join("Preferences.yaml")).unwrap();
        fs::write(&path, "- not\n- a\n- map\n").unwrap();

        assert!(FilePreferenceStore::open(&path).is_err());
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryPreferenceStore::with_value("theme", "light");
        assert_eq!(store.get("theme"), Some("light".to_string()));
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme"), Some("dark".to_string()));
    }
}
