//! Static declarative metadata for settings rows.
//!
//! A descriptor names the config key, display text, widget kind and its
//! constraints; it carries no persisted state itself.

use verselay_core::ConfigStore;

/// Visibility predicate evaluated against current config state
pub type VisibilityFn = fn(&ConfigStore) -> bool;

/// Widget kind plus widget-specific constraints and fallback default
#[derive(Debug, Clone)]
pub enum Control {
    Toggle {
        default: bool,
    },
    Stepper {
        min: i64,
        max: i64,
        step: i64,
        default: i64,
    },
    /// Enumerated choices as `(stored value, display label)` pairs
    Select {
        options: &'static [(&'static str, &'static str)],
        default: &'static str,
    },
    Text {
        default: &'static str,
    },
    Hotkey {
        default: &'static str,
    },
}

/// Declarative description of one settings row
#[derive(Clone)]
pub struct OptionDescriptor {
    /// Key into the config record (within the `visual:` namespace)
    pub key: &'static str,
    pub label: &'static str,
    /// Optional explanatory text; may contain markup
    pub info: Option<&'static str>,
    pub control: Control,
    /// Row is rendered only when this predicate holds (absent = always)
    pub when: Option<VisibilityFn>,
}

impl OptionDescriptor {
    #[must_use]
    pub const fn new(key: &'static str, label: &'static str, control: Control) -> Self {
        Self {
            key,
            label,
            info: None,
            control,
            when: None,
        }
    }

    #[must_use]
    pub const fn with_info(mut self, info: &'static str) -> Self {
        self.info = Some(info);
        self
    }

    #[must_use]
    pub const fn visible_when(mut self, when: VisibilityFn) -> Self {
        self.when = Some(when);
        self
    }

    /// Whether this row should currently be shown
    #[must_use]
    pub fn is_visible(&self, config: &ConfigStore) -> bool {
        self.when.map_or(true, |when| when(config))
    }
}

impl std::fmt::Debug for OptionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionDescriptor")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("control", &self.control)
            .field("conditional", &self.when.is_some())
            .finish_non_exhaustive()
    }
}
