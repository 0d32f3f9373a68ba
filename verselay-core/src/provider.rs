//! Provider entries and the ordered, persisted provider registry.
//!
//! A provider is a named source of lyrics or of translations. Ordering
//! among entries is itself data (lookup priority) and is persisted as a
//! JSON-encoded list of names.

use crate::bus::{SettingsBus, SettingsEvent};
use crate::config::ConfigStore;
use tracing::debug;

/// Which list a provider belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Lyrics,
    Translation,
}

impl ProviderKind {
    /// Key segment used for per-provider persisted fields
    #[must_use]
    pub const fn key_segment(self) -> &'static str {
        match self {
            Self::Lyrics => "provider",
            Self::Translation => "translate",
        }
    }

    /// Key under which this list's ordering is persisted
    #[must_use]
    pub const fn order_key(self) -> &'static str {
        match self {
            Self::Lyrics => "services-order",
            Self::Translation => "translate-order",
        }
    }
}

/// UI affordance attached to a provider entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderAction {
    /// Clear the locally cached lyrics blob
    ClearCache,
    /// Fetch a fresh credential from the provider's token endpoint
    RefreshToken,
}

/// Capability predicate deciding whether a provider's enabled flag may be
/// toggled on the current host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TogglePolicy {
    Always,
    /// Toggling is refused when the host version string compares at or
    /// above the given threshold
    LockedAtOrAbove { host_version: String },
}

impl TogglePolicy {
    /// Whether toggling is allowed for the given host version
    #[must_use]
    pub fn allows(&self, host_version: &str) -> bool {
        match self {
            Self::Always => true,
            Self::LockedAtOrAbove { host_version: min } => host_version < min.as_str(),
        }
    }
}

/// Static metadata describing one lyric or translation source
#[derive(Debug, Clone)]
pub struct ProviderDescriptor {
    /// Stable name; identity key for persistence and ordering
    pub name: String,
    /// Display description; may contain markup
    pub description: String,
    pub default_enabled: bool,
    /// Whether this provider takes a credential string
    pub has_credential: bool,
    pub action: Option<ProviderAction>,
    pub toggle_policy: TogglePolicy,
}

impl ProviderDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            default_enabled: true,
            has_credential: false,
            action: None,
            toggle_policy: TogglePolicy::Always,
        }
    }

    #[must_use]
    pub const fn enabled_by_default(mut self, enabled: bool) -> Self {
        self.default_enabled = enabled;
        self
    }

    #[must_use]
    pub const fn with_credential(mut self) -> Self {
        self.has_credential = true;
        self
    }

    #[must_use]
    pub const fn with_action(mut self, action: ProviderAction) -> Self {
        self.action = Some(action);
        self
    }

    #[must_use]
    pub fn with_toggle_policy(mut self, policy: TogglePolicy) -> Self {
        self.toggle_policy = policy;
        self
    }
}

/// Direction of an adjacent-swap reorder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapDirection {
    Up,
    Down,
}

/// Ordered, persisted collection of providers of one kind.
///
/// Enabled flags and credentials are persisted per provider under keys
/// derived from the provider name; the ordering is persisted as one
/// JSON-encoded list of names.
pub struct ProviderRegistry {
    kind: ProviderKind,
    descriptors: Vec<ProviderDescriptor>,
    order: Vec<String>,
    config: ConfigStore,
    bus: SettingsBus,
    host_version: String,
}

impl ProviderRegistry {
    /// Build a registry, restoring the persisted ordering.
    ///
    /// Unknown names in the persisted list are dropped and descriptors
    /// missing from it are appended in declaration order, so a stale list
    /// never hides a provider.
    pub fn new(
        kind: ProviderKind,
        descriptors: Vec<ProviderDescriptor>,
        config: ConfigStore,
        bus: SettingsBus,
        host_version: impl Into<String>,
    ) -> Self {
        let persisted = config.get_list(kind.order_key()).unwrap_or_default();

        let mut order: Vec<String> = persisted
            .into_iter()
            .filter(|name| descriptors.iter().any(|d| &d.name == name))
            .collect();
        for descriptor in &descriptors {
            if !order.contains(&descriptor.name) {
                order.push(descriptor.name.clone());
            }
        }

        Self {
            kind,
            descriptors,
            order,
            config,
            bus,
            host_version: host_version.into(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ProviderKind {
        self.kind
    }

    /// Provider names in display/lookup priority order
    #[must_use]
    pub fn order(&self) -> &[String] {
        &self.order
    }

    #[must_use]
    pub fn descriptor(&self, name: &str) -> Option<&ProviderDescriptor> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    fn field_key(&self, name: &str, field: &str) -> String {
        format!("{}:{}:{}", self.kind.key_segment(), name, field)
    }

    /// Whether the provider's enabled flag may be toggled on this host
    #[must_use]
    pub fn can_toggle(&self, name: &str) -> bool {
        self.descriptor(name)
            .is_some_and(|d| d.toggle_policy.allows(&self.host_version))
    }

    #[must_use]
    pub fn enabled(&self, name: &str) -> bool {
        let default = self.descriptor(name).is_some_and(|d| d.default_enabled);
        self.config.get_bool(&self.field_key(name, "on"), default)
    }

    /// Set a provider's enabled flag.
    ///
    /// Returns `false` without persisting when the provider is unknown or
    /// its toggle policy locks it on this host.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        if self.descriptor(name).is_none() || !self.can_toggle(name) {
            debug!("Refusing toggle for provider {}", name);
            return false;
        }

        self.config.set_bool(&self.field_key(name, "on"), enabled);
        self.bus.publish(SettingsEvent::ProviderToggled {
            kind: self.kind,
            name: name.to_string(),
            enabled,
        });
        true
    }

    #[must_use]
    pub fn credential(&self, name: &str) -> Option<String> {
        self.config.get_raw(&self.field_key(name, "token"))
    }

    pub fn set_credential(&mut self, name: &str, credential: &str) {
        if self.descriptor(name).is_none() {
            return;
        }
        self.config
            .set_raw(&self.field_key(name, "token"), credential);
        self.bus.publish(SettingsEvent::CredentialChanged {
            kind: self.kind,
            name: name.to_string(),
        });
    }

    /// Swap a provider with its neighbor in the given direction.
    ///
    /// A no-op returning `false` when the move would push the first entry
    /// up or the last entry down, or when the name is unknown.
    pub fn swap(&mut self, name: &str, direction: SwapDirection) -> bool {
        let Some(pos) = self.order.iter().position(|n| n == name) else {
            return false;
        };

        let target = match direction {
            SwapDirection::Up => {
                if pos == 0 {
                    return false;
                }
                pos - 1
            }
            SwapDirection::Down => {
                if pos + 1 >= self.order.len() {
                    return false;
                }
                pos + 1
            }
        };

        self.order.swap(pos, target);
        self.config.set_list(self.kind.order_key(), &self.order);
        self.bus.publish(SettingsEvent::OrderChanged {
            kind: self.kind,
            names: self.order.clone(),
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, PrefStore};
    use std::sync::Arc;

    fn descriptors() -> Vec<ProviderDescriptor> {
        vec![
            ProviderDescriptor::new("musixmatch", "Fully synced lyrics").with_credential(),
            ProviderDescriptor::new("netease", "Chinese tracks"),
            ProviderDescriptor::new("genius", "Text lyrics").with_toggle_policy(
                TogglePolicy::LockedAtOrAbove {
                    host_version: "1.2.31".to_string(),
                },
            ),
        ]
    }

    fn registry(host_version: &str) -> ProviderRegistry {
        let config = ConfigStore::new(Arc::new(MemoryStore::new()));
        ProviderRegistry::new(
            ProviderKind::Lyrics,
            descriptors(),
            config,
            SettingsBus::new(),
            host_version,
        )
    }

    #[test]
    fn test_initial_order_follows_declaration() {
        let registry = registry("1.2.30");
        assert_eq!(registry.order(), ["musixmatch", "netease", "genius"]);
    }

    #[test]
    fn test_swap_persists_and_reloads() {
        let config = ConfigStore::new(Arc::new(MemoryStore::new()));
        let bus = SettingsBus::new();
        let mut registry = ProviderRegistry::new(
            ProviderKind::Lyrics,
            descriptors(),
            config.clone(),
            bus.clone(),
            "1.2.30",
        );

        assert!(registry.swap("netease", SwapDirection::Up));
        assert_eq!(registry.order(), ["netease", "musixmatch", "genius"]);

        // A fresh registry over the same store restores the new order
        let reloaded =
            ProviderRegistry::new(ProviderKind::Lyrics, descriptors(), config, bus, "1.2.30");
        assert_eq!(reloaded.order(), ["netease", "musixmatch", "genius"]);
    }

    #[test]
    fn test_swap_is_noop_at_the_ends() {
        let mut registry = registry("1.2.30");
        assert!(!registry.swap("musixmatch", SwapDirection::Up));
        assert!(!registry.swap("genius", SwapDirection::Down));
        assert_eq!(registry.order(), ["musixmatch", "netease", "genius"]);
    }

    #[test]
    fn test_swap_emits_order_event() {
        let config = ConfigStore::new(Arc::new(MemoryStore::new()));
        let bus = SettingsBus::new();
        let mut rx = bus.subscribe();
        let mut registry = ProviderRegistry::new(
            ProviderKind::Lyrics,
            descriptors(),
            config,
            bus,
            "1.2.30",
        );

        assert!(registry.swap("genius", SwapDirection::Up));
        let event = rx.try_recv().unwrap();
        assert_eq!(
            event,
            SettingsEvent::OrderChanged {
                kind: ProviderKind::Lyrics,
                names: vec![
                    "musixmatch".to_string(),
                    "genius".to_string(),
                    "netease".to_string(),
                ],
            }
        );
    }

    #[test]
    fn test_toggle_persists_under_derived_key() {
        let store = Arc::new(MemoryStore::new());
        let config = ConfigStore::new(store.clone());
        let mut registry = ProviderRegistry::new(
            ProviderKind::Lyrics,
            descriptors(),
            config,
            SettingsBus::new(),
            "1.2.30",
        );

        assert!(registry.set_enabled("netease", false));
        assert_eq!(
            store.get("verselay:provider:netease:on"),
            Some("false".to_string())
        );
        assert!(!registry.enabled("netease"));
    }

    #[test]
    fn test_toggle_policy_locks_above_threshold() {
        let mut locked = registry("1.2.31");
        assert!(!locked.can_toggle("genius"));
        assert!(!locked.set_enabled("genius", false));

        let mut unlocked = registry("1.2.30");
        assert!(unlocked.can_toggle("genius"));
        assert!(unlocked.set_enabled("genius", false));
    }

    #[test]
    fn test_stale_persisted_order_is_reconciled() {
        let config = ConfigStore::new(Arc::new(MemoryStore::new()));
        config.set_list(
            "services-order",
            &["gone".to_string(), "genius".to_string()],
        );

        let registry = ProviderRegistry::new(
            ProviderKind::Lyrics,
            descriptors(),
            config,
            SettingsBus::new(),
            "1.2.30",
        );
        // Unknown name dropped, missing names appended
        assert_eq!(registry.order(), ["genius", "musixmatch", "netease"]);
    }

    #[test]
    fn test_credential_round_trip() {
        let mut registry = registry("1.2.30");
        assert_eq!(registry.credential("musixmatch"), None);
        registry.set_credential("musixmatch", "user-token");
        assert_eq!(
            registry.credential("musixmatch"),
            Some("user-token".to_string())
        );
    }
}
