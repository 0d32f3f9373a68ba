//! Durable key-value storage behind the settings panel.
//!
//! Values are stored as strings (numbers and booleans in their string form,
//! lists as JSON-encoded strings). Each write persists synchronously and
//! independently; there is no transactional grouping across keys.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{info, warn};

/// Pluggable persistence adapter for string key-value preferences.
pub trait PrefStore: Send + Sync {
    /// Read a value by its fully namespaced key
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, persisting it immediately
    fn set(&self, key: &str, value: &str);

    /// Remove a key if present
    fn remove(&self, key: &str);
}

/// In-memory store for tests and hosts without durable storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

/// File-backed store persisting all entries as a single JSON object.
///
/// The file is read once when the store is opened and rewritten on every
/// mutation. An unreadable or unparsable file is treated as empty rather
/// than propagated as an error.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open the store at the default location (`~/.config/verselay/prefs.json`)
    #[must_use]
    pub fn open_default() -> Self {
        Self::open(&crate::paths::prefs_path())
    }

    /// Open a store backed by the given file path
    #[must_use]
    pub fn open(path: &Path) -> Self {
        let entries = Self::load(path);
        info!("Opened preference store at {:?} ({} entries)", path, entries.len());
        Self {
            path: path.to_path_buf(),
            entries: Mutex::new(entries),
        }
    }

    fn load(path: &Path) -> BTreeMap<String, String> {
        if !path.exists() {
            return BTreeMap::new();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Failed to parse preference store, starting empty: {}", e);
                    BTreeMap::new()
                }
            },
            Err(e) => {
                warn!("Failed to read preference store, starting empty: {}", e);
                BTreeMap::new()
            }
        }
    }

    fn persist(&self, entries: &BTreeMap<String, String>) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("Failed to create preference directory: {}", e);
                return;
            }
        }

        match serde_json::to_string_pretty(entries) {
            Ok(content) => {
                if let Err(e) = fs::write(&self.path, content) {
                    warn!("Failed to write preference store: {}", e);
                }
            }
            Err(e) => {
                warn!("Failed to serialize preference store: {}", e);
            }
        }
    }
}

impl PrefStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
            self.persist(&entries);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            if entries.remove(key).is_some() {
                self.persist(&entries);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "verselay-store-test-{}-{}.json",
            tag,
            std::process::id()
        ))
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("missing"), None);

        store.set("verselay:visual:noise", "true");
        assert_eq!(store.get("verselay:visual:noise"), Some("true".to_string()));

        store.remove("verselay:visual:noise");
        assert_eq!(store.get("verselay:visual:noise"), None);
    }

    #[test]
    fn test_file_store_persists_across_reopen() {
        let path = temp_store_path("reopen");
        let _ = fs::remove_file(&path);

        {
            let store = JsonFileStore::open(&path);
            store.set("verselay:global-delay", "250");
        }

        let reopened = JsonFileStore::open(&path);
        assert_eq!(
            reopened.get("verselay:global-delay"),
            Some("250".to_string())
        );

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_corrupt_file_treated_as_empty() {
        let path = temp_store_path("corrupt");
        fs::write(&path, "not valid json {{{").unwrap();

        let store = JsonFileStore::open(&path);
        assert_eq!(store.get("anything"), None);

        // Still usable after the corrupt load
        store.set("key", "value");
        assert_eq!(store.get("key"), Some("value".to_string()));

        let _ = fs::remove_file(&path);
    }
}
