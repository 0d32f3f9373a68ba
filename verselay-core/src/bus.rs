//! Change-notification bus for settings mutations.
//!
//! Other open views of the same option set subscribe here instead of
//! listening on any UI-runtime event mechanism, so the panel and adapters
//! can be exercised without a rendering host.

use crate::provider::ProviderKind;
use tokio::sync::broadcast;

/// A typed option value carried by change events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

/// Events emitted when settings change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    /// A visual option changed value
    OptionChanged { name: String, value: SettingValue },
    /// A provider was enabled or disabled
    ProviderToggled {
        kind: ProviderKind,
        name: String,
        enabled: bool,
    },
    /// A provider credential was edited
    CredentialChanged { kind: ProviderKind, name: String },
    /// A provider list was reordered
    OrderChanged {
        kind: ProviderKind,
        names: Vec<String>,
    },
}

/// Broadcast bus for settings change events
#[derive(Debug, Clone)]
pub struct SettingsBus {
    tx: broadcast::Sender<SettingsEvent>,
}

impl SettingsBus {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(64);
        Self { tx }
    }

    /// Subscribe to settings events
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SettingsEvent> {
        self.tx.subscribe()
    }

    /// Publish an event to all subscribers.
    ///
    /// Delivery is best-effort: an event published with no live
    /// subscribers is dropped.
    pub fn publish(&self, event: SettingsEvent) {
        let _ = self.tx.send(event);
    }
}

impl Default for SettingsBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_receives_option_change() {
        let bus = SettingsBus::new();
        let mut rx = bus.subscribe();

        bus.publish(SettingsEvent::OptionChanged {
            name: "noise".to_string(),
            value: SettingValue::Bool(false),
        });

        let event = rx.recv().await.unwrap();
        assert_eq!(
            event,
            SettingsEvent::OptionChanged {
                name: "noise".to_string(),
                value: SettingValue::Bool(false),
            }
        );
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_dropped() {
        let bus = SettingsBus::new();
        // Must not panic or error with nobody listening
        bus.publish(SettingsEvent::OrderChanged {
            kind: ProviderKind::Lyrics,
            names: vec!["musixmatch".to_string()],
        });
    }
}
