//! Provider list view-models.
//!
//! One row per provider in priority order, each exposing its toggle,
//! adjacent-swap reordering (disabled at the two ends), and credential
//! editing. All mutations go through the registry, which persists and
//! broadcasts them.

use verselay_core::{ProviderAction, ProviderRegistry, SwapDirection};

/// Snapshot of one provider row's render state
#[derive(Debug, Clone)]
pub struct ProviderRow {
    pub name: String,
    pub description: String,
    pub enabled: bool,
    /// Whether the enabled toggle responds on this host
    pub can_toggle: bool,
    pub credential: Option<String>,
    pub has_credential: bool,
    pub action: Option<ProviderAction>,
    pub is_first: bool,
    pub is_last: bool,
}

/// Reorderable list of providers of one kind
pub struct ProviderListView {
    registry: ProviderRegistry,
}

impl ProviderListView {
    #[must_use]
    pub const fn new(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    /// Rows in display/lookup priority order
    #[must_use]
    pub fn rows(&self) -> Vec<ProviderRow> {
        let order = self.registry.order();
        let last = order.len().saturating_sub(1);

        order
            .iter()
            .enumerate()
            .filter_map(|(index, name)| {
                let descriptor = self.registry.descriptor(name)?;
                Some(ProviderRow {
                    name: name.clone(),
                    description: descriptor.description.clone(),
                    enabled: self.registry.enabled(name),
                    can_toggle: self.registry.can_toggle(name),
                    credential: self.registry.credential(name),
                    has_credential: descriptor.has_credential,
                    action: descriptor.action,
                    is_first: index == 0,
                    is_last: index == last,
                })
            })
            .collect()
    }

    /// Flip a provider's enabled flag; `false` when the toggle is refused
    pub fn toggle(&mut self, name: &str) -> bool {
        let next = !self.registry.enabled(name);
        self.registry.set_enabled(name, next)
    }

    pub fn swap_up(&mut self, name: &str) -> bool {
        self.registry.swap(name, SwapDirection::Up)
    }

    pub fn swap_down(&mut self, name: &str) -> bool {
        self.registry.swap(name, SwapDirection::Down)
    }

    pub fn set_credential(&mut self, name: &str, credential: &str) {
        self.registry.set_credential(name, credential);
    }

    #[must_use]
    pub const fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use verselay_core::{
        ConfigStore, MemoryStore, ProviderDescriptor, ProviderKind, SettingsBus, TogglePolicy,
    };

    fn view(host_version: &str) -> ProviderListView {
        let config = ConfigStore::new(Arc::new(MemoryStore::new()));
        let registry = ProviderRegistry::new(
            ProviderKind::Lyrics,
            vec![
                ProviderDescriptor::new("musixmatch", "Synced lyrics")
                    .with_credential()
                    .with_action(ProviderAction::RefreshToken),
                ProviderDescriptor::new("genius", "Text lyrics").with_toggle_policy(
                    TogglePolicy::LockedAtOrAbove {
                        host_version: "1.2.31".to_string(),
                    },
                ),
                ProviderDescriptor::new("local", "Cached lyrics")
                    .with_action(ProviderAction::ClearCache),
            ],
            config,
            SettingsBus::new(),
            host_version,
        );
        ProviderListView::new(registry)
    }

    #[test]
    fn test_rows_flag_ends() {
        let view = view("1.2.30");
        let rows = view.rows();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_first && !rows[0].is_last);
        assert!(!rows[1].is_first && !rows[1].is_last);
        assert!(!rows[2].is_first && rows[2].is_last);
    }

    #[test]
    fn test_rows_carry_actions() {
        let view = view("1.2.30");
        let rows = view.rows();
        assert_eq!(rows[0].action, Some(ProviderAction::RefreshToken));
        assert_eq!(rows[1].action, None);
        assert_eq!(rows[2].action, Some(ProviderAction::ClearCache));
    }

    #[test]
    fn test_toggle_suppressed_by_policy() {
        let mut view = view("1.2.31");
        assert!(!view.rows()[1].can_toggle);
        assert!(!view.toggle("genius"));
        assert!(view.rows()[1].enabled);
    }

    #[test]
    fn test_swap_reorders_rows() {
        let mut view = view("1.2.30");
        assert!(view.swap_down("musixmatch"));

        let names: Vec<_> = view.rows().into_iter().map(|r| r.name).collect();
        assert_eq!(names, ["genius", "musixmatch", "local"]);
    }

    #[test]
    fn test_credential_edit_shows_in_rows() {
        let mut view = view("1.2.30");
        view.set_credential("musixmatch", "tok");
        assert_eq!(view.rows()[0].credential, Some("tok".to_string()));
    }
}
