//! Musixmatch token client.
//!
//! Fetches a fresh user token from the unofficial desktop API. Responses
//! arrive in the `{message: {header: {status_code}, body: {...}}}`
//! envelope; 200 carries a token, 401 means the endpoint is rate
//! limiting, anything else is a generic failure.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};
use verselay_core::{CoreError, Result, TokenSource};

const LOG_TARGET: &str = "verselay::musixmatch";
const TOKEN_URL: &str =
    "https://apic-desktop.musixmatch.com/ws/1.1/token.get?app_id=web-desktop-app-v1.0";

/// Client for the musixmatch token endpoint
pub struct MusixmatchTokenClient {
    client: reqwest::Client,
    endpoint: String,
}

impl MusixmatchTokenClient {
    /// Create a new token client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            endpoint: TOKEN_URL.to_string(),
        })
    }

    /// Override the token endpoint (used against local test servers)
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct TokenEnvelope {
    message: TokenMessage,
}

#[derive(Debug, Deserialize)]
struct TokenMessage {
    header: TokenHeader,
    body: Option<TokenBody>,
}

#[derive(Debug, Deserialize)]
struct TokenHeader {
    status_code: u16,
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    user_token: Option<String>,
}

/// Map the response envelope onto the error taxonomy: 200 with a token
/// succeeds, 401 is surfaced as a distinguishable rate-limit state, and
/// everything else is a generic refresh failure.
fn evaluate(envelope: TokenEnvelope) -> Result<String> {
    let status = envelope.message.header.status_code;
    match status {
        200 => envelope
            .message
            .body
            .and_then(|body| body.user_token)
            .ok_or_else(|| CoreError::TokenRefreshFailed {
                reason: "response carried no user token".to_string(),
            }),
        401 => Err(CoreError::RateLimited {
            provider: "musixmatch".to_string(),
        }),
        other => Err(CoreError::TokenRefreshFailed {
            reason: format!("status code {other}"),
        }),
    }
}

#[async_trait]
impl TokenSource for MusixmatchTokenClient {
    async fn refresh_token(&self) -> Result<String> {
        info!(target: LOG_TARGET, "Refreshing musixmatch user token");

        let envelope: TokenEnvelope = self
            .client
            .get(&self.endpoint)
            .header("authority", "apic-desktop.musixmatch.com")
            .send()
            .await?
            .json()
            .await?;

        match evaluate(envelope) {
            Ok(token) => {
                info!(target: LOG_TARGET, "Obtained fresh musixmatch token");
                Ok(token)
            }
            Err(e) => {
                warn!(target: LOG_TARGET, "Token refresh failed: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(json: &str) -> TokenEnvelope {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_success_yields_token() {
        let token = evaluate(envelope(
            r#"{"message":{"header":{"status_code":200},"body":{"user_token":"abc123"}}}"#,
        ))
        .unwrap();
        assert_eq!(token, "abc123");
    }

    #[test]
    fn test_rate_limit_is_distinguishable() {
        let result = evaluate(envelope(
            r#"{"message":{"header":{"status_code":401},"body":{}}}"#,
        ));
        assert!(matches!(result, Err(CoreError::RateLimited { .. })));
    }

    #[test]
    fn test_other_status_is_generic_failure() {
        let result = evaluate(envelope(
            r#"{"message":{"header":{"status_code":500},"body":{}}}"#,
        ));
        assert!(matches!(result, Err(CoreError::TokenRefreshFailed { .. })));
    }

    #[test]
    fn test_success_without_token_is_failure() {
        let result = evaluate(envelope(
            r#"{"message":{"header":{"status_code":200},"body":{}}}"#,
        ));
        assert!(matches!(result, Err(CoreError::TokenRefreshFailed { .. })));
    }
}
