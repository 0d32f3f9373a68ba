use crate::error::Result;
use crate::line::LyricLine;
use async_trait::async_trait;

/// Trait for translation backends.
///
/// Implementations batch the whole sequence into one network round trip
/// and split the result back by positional index, so the output sequence
/// has the same length and position-wise start times as the input and only
/// the text of each line changes.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &'static str;

    /// Translate a non-empty, time-ordered sequence of lyric lines.
    ///
    /// Returns `Ok(None)` when the provider response lacks a usable
    /// result; callers must fall back to the untranslated text rather
    /// than treat this as an error.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a malformed credential.
    async fn translate(
        &self,
        lines: &[LyricLine],
        credential: &str,
    ) -> Result<Option<Vec<LyricLine>>>;
}

/// Trait for providers whose credential can be fetched from a remote
/// token endpoint instead of being entered by hand.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Fetch a fresh credential.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::RateLimited`] when the endpoint
    /// reports too many attempts, and a generic failure otherwise.
    async fn refresh_token(&self) -> Result<String>;
}
