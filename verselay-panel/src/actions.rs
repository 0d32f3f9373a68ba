//! Per-provider affordances: local cache clearing and token refresh.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;
use verselay_core::{ConfigStore, CoreError, TokenSource};

/// Key holding the locally cached lyrics blob (a JSON object keyed by
/// track id)
pub const LOCAL_LYRICS_KEY: &str = "local-lyrics";

/// Cache-clear affordance for the `local` provider.
///
/// Inspects the persisted blob on construction; a corrupted blob is
/// treated as empty, never propagated.
#[derive(Debug)]
pub struct LocalCacheAction {
    config: ConfigStore,
    count: usize,
}

impl LocalCacheAction {
    #[must_use]
    pub fn new(config: ConfigStore) -> Self {
        let count = config
            .get_raw(LOCAL_LYRICS_KEY)
            .and_then(|raw| {
                serde_json::from_str::<HashMap<String, serde_json::Value>>(&raw).ok()
            })
            .map_or(0, |blob| blob.len());
        Self { config, count }
    }

    /// Number of cached entries
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// The affordance disables itself when there is nothing to clear
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.count > 0
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        if self.count > 0 {
            "Clear cached lyrics"
        } else {
            "No cached lyrics"
        }
    }

    /// Remove the cached blob
    pub fn clear(&mut self) {
        self.config.remove(LOCAL_LYRICS_KEY);
        self.count = 0;
    }
}

/// Token refresh button states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    Idle,
    Refreshing,
    Refreshed,
    TooManyAttempts,
    Failed,
}

/// Token-refresh affordance for credential providers.
///
/// One manual press drives one network round trip; there is no automatic
/// retry and an in-flight call cannot be cancelled. Terminal states keep
/// the button disabled, matching the single-shot behavior of the row.
pub struct TokenRefreshAction {
    source: Arc<dyn TokenSource>,
    state: RefreshState,
}

impl TokenRefreshAction {
    #[must_use]
    pub fn new(source: Arc<dyn TokenSource>) -> Self {
        Self {
            source,
            state: RefreshState::Idle,
        }
    }

    #[must_use]
    pub const fn state(&self) -> RefreshState {
        self.state
    }

    #[must_use]
    pub const fn can_press(&self) -> bool {
        matches!(self.state, RefreshState::Idle)
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self.state {
            RefreshState::Idle => "Refresh token",
            RefreshState::Refreshing => "Refreshing token...",
            RefreshState::Refreshed => "Token refreshed",
            RefreshState::TooManyAttempts => "Too many attempts",
            RefreshState::Failed => "Failed to refresh token",
        }
    }

    /// Press the button: fetch a fresh token.
    ///
    /// Returns the new token on success so the caller can store it as the
    /// provider's credential. Failures land in a terminal state instead
    /// of propagating.
    pub async fn press(&mut self) -> Option<String> {
        if !self.can_press() {
            return None;
        }

        self.state = RefreshState::Refreshing;
        match self.source.refresh_token().await {
            Ok(token) => {
                self.state = RefreshState::Refreshed;
                Some(token)
            }
            Err(CoreError::RateLimited { .. }) => {
                self.state = RefreshState::TooManyAttempts;
                None
            }
            Err(e) => {
                warn!("Failed to refresh token: {}", e);
                self.state = RefreshState::Failed;
                None
            }
        }
    }

    /// Re-arm the button for another manual attempt
    pub fn reset(&mut self) {
        self.state = RefreshState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use verselay_core::{MemoryStore, Result};

    fn config() -> ConfigStore {
        ConfigStore::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_cache_action_empty_blob_disabled() {
        let action = LocalCacheAction::new(config());
        assert_eq!(action.count(), 0);
        assert!(!action.is_enabled());
        assert_eq!(action.label(), "No cached lyrics");
    }

    #[test]
    fn test_cache_action_corrupt_blob_treated_as_empty() {
        let config = config();
        config.set_raw(LOCAL_LYRICS_KEY, "][ corrupt");
        let action = LocalCacheAction::new(config);
        assert!(!action.is_enabled());
    }

    #[test]
    fn test_cache_action_counts_and_clears() {
        let config = config();
        config.set_raw(
            LOCAL_LYRICS_KEY,
            r#"{"track-a":"[00:01.00]line","track-b":"[00:02.00]line"}"#,
        );

        let mut action = LocalCacheAction::new(config.clone());
        assert_eq!(action.count(), 2);
        assert_eq!(action.label(), "Clear cached lyrics");

        action.clear();
        assert!(!action.is_enabled());
        assert_eq!(config.get_raw(LOCAL_LYRICS_KEY), None);
    }

    struct FakeSource {
        results: Mutex<Vec<Result<String>>>,
    }

    #[async_trait]
    impl TokenSource for FakeSource {
        async fn refresh_token(&self) -> Result<String> {
            self.results
                .lock()
                .map_err(|_| CoreError::TokenRefreshFailed {
                    reason: "poisoned".to_string(),
                })?
                .pop()
                .unwrap_or(Err(CoreError::TokenRefreshFailed {
                    reason: "exhausted".to_string(),
                }))
        }
    }

    fn source(result: Result<String>) -> Arc<FakeSource> {
        Arc::new(FakeSource {
            results: Mutex::new(vec![result]),
        })
    }

    #[tokio::test]
    async fn test_refresh_success_yields_token() {
        let mut action = TokenRefreshAction::new(source(Ok("tok".to_string())));
        assert_eq!(action.label(), "Refresh token");

        let token = action.press().await;
        assert_eq!(token, Some("tok".to_string()));
        assert_eq!(action.state(), RefreshState::Refreshed);
        assert_eq!(action.label(), "Token refreshed");
        assert!(!action.can_press());
    }

    #[tokio::test]
    async fn test_refresh_rate_limited_is_distinguishable() {
        let mut action = TokenRefreshAction::new(source(Err(CoreError::RateLimited {
            provider: "musixmatch".to_string(),
        })));

        assert_eq!(action.press().await, None);
        assert_eq!(action.state(), RefreshState::TooManyAttempts);
    }

    #[tokio::test]
    async fn test_refresh_failure_is_terminal_until_reset() {
        let mut action = TokenRefreshAction::new(source(Err(CoreError::TokenRefreshFailed {
            reason: "boom".to_string(),
        })));

        assert_eq!(action.press().await, None);
        assert_eq!(action.state(), RefreshState::Failed);

        // Terminal state swallows further presses
        assert_eq!(action.press().await, None);

        action.reset();
        assert!(action.can_press());
    }
}
