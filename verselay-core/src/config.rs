//! Typed view over the preference store.
//!
//! All user-configurable options live in a flat string key-value namespace
//! under the `verselay:` application prefix. Each typed setter writes
//! through to the persistence adapter immediately; reads fall back to a
//! caller-supplied default when the key is absent or unparsable.

use crate::store::PrefStore;
use std::sync::Arc;
use tracing::warn;

/// Application prefix for every persisted key
pub const KEY_PREFIX: &str = "verselay";

/// Explicit, injected configuration object backed by a pluggable
/// persistence adapter. Cheap to clone; clones share the same store.
#[derive(Clone)]
pub struct ConfigStore {
    store: Arc<dyn PrefStore>,
}

impl ConfigStore {
    #[must_use]
    pub fn new(store: Arc<dyn PrefStore>) -> Self {
        Self { store }
    }

    fn full_key(key: &str) -> String {
        format!("{KEY_PREFIX}:{key}")
    }

    /// Read the raw string value for a key
    #[must_use]
    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.store.get(&Self::full_key(key))
    }

    /// Write a raw string value for a key
    pub fn set_raw(&self, key: &str, value: &str) {
        self.store.set(&Self::full_key(key), value);
    }

    /// Remove a key
    pub fn remove(&self, key: &str) {
        self.store.remove(&Self::full_key(key));
    }

    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get_raw(key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    pub fn set_bool(&self, key: &str, value: bool) {
        self.set_raw(key, if value { "true" } else { "false" });
    }

    #[must_use]
    pub fn get_i64(&self, key: &str, default: i64) -> i64 {
        self.get_raw(key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    pub fn set_i64(&self, key: &str, value: i64) {
        self.set_raw(key, &value.to_string());
    }

    #[must_use]
    pub fn get_str(&self, key: &str, default: &str) -> String {
        self.get_raw(key).unwrap_or_else(|| default.to_string())
    }

    pub fn set_str(&self, key: &str, value: &str) {
        self.set_raw(key, value);
    }

    /// Read an ordered list stored as a JSON-encoded string.
    ///
    /// A missing or unparsable list is reported as `None`; callers supply
    /// their own fallback ordering.
    #[must_use]
    pub fn get_list(&self, key: &str) -> Option<Vec<String>> {
        let raw = self.get_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(list) => Some(list),
            Err(e) => {
                warn!("Ignoring unparsable list under {}: {}", key, e);
                None
            }
        }
    }

    /// Persist an ordered list as a JSON-encoded string
    pub fn set_list(&self, key: &str, items: &[String]) {
        match serde_json::to_string(items) {
            Ok(encoded) => self.set_raw(key, &encoded),
            Err(e) => warn!("Failed to encode list under {}: {}", key, e),
        }
    }
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn config() -> ConfigStore {
        ConfigStore::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_defaults_when_absent() {
        let config = config();
        assert!(config.get_bool("visual:noise", true));
        assert_eq!(config.get_i64("visual:global-delay", 0), 0);
        assert_eq!(config.get_str("visual:alignment", "center"), "center");
        assert_eq!(config.get_list("services-order"), None);
    }

    #[test]
    fn test_bool_round_trip_as_string_form() {
        let config = config();
        config.set_bool("visual:colorful", false);
        assert_eq!(config.get_raw("visual:colorful"), Some("false".to_string()));
        assert!(!config.get_bool("visual:colorful", true));
    }

    #[test]
    fn test_keys_are_namespaced() {
        let store = Arc::new(MemoryStore::new());
        let config = ConfigStore::new(store.clone());
        config.set_i64("visual:font-size", 32);
        assert_eq!(
            store.get("verselay:visual:font-size"),
            Some("32".to_string())
        );
    }

    #[test]
    fn test_list_round_trip_is_json_encoded() {
        let config = config();
        let order = vec!["musixmatch".to_string(), "netease".to_string()];
        config.set_list("services-order", &order);
        assert_eq!(
            config.get_raw("services-order"),
            Some(r#"["musixmatch","netease"]"#.to_string())
        );
        assert_eq!(config.get_list("services-order"), Some(order));
    }

    #[test]
    fn test_corrupt_list_reads_as_none() {
        let config = config();
        config.set_raw("services-order", "not json");
        assert_eq!(config.get_list("services-order"), None);
    }
}
