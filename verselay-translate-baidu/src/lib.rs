//! Baidu translation adapter.
//!
//! Signature-based representative of the [`Translator`] contract: the
//! whole lyric sequence is joined into one query, signed with the
//! caller's `appid:secret` credential, sent as a single GET, and the
//! per-line results are re-attached to the original start times.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};
use verselay_core::{is_time_ordered, join_texts, CoreError, LyricLine, Result, Translator};

const LOG_TARGET: &str = "verselay::translate::baidu";
const BAIDU_API_URL: &str = "https://fanyi-api.baidu.com/api/trans/vip/translate";

/// Baidu general-translation API adapter.
///
/// No retry, timeout, or rate limiting is layered on the single round
/// trip; callers needing resilience add it externally.
pub struct BaiduTranslator {
    client: reqwest::Client,
    endpoint: String,
    target_lang: String,
}

impl BaiduTranslator {
    /// Create an adapter translating into the given target language code
    /// (e.g. `"zh"`, `"en"`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(target_lang: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            endpoint: BAIDU_API_URL.to_string(),
            target_lang: target_lang.into(),
        })
    }

    /// Override the API endpoint (used against local test servers)
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn build_url(&self, credential: &Credential<'_>, query: &str, salt: i64) -> String {
        let sign = sign_request(credential.appid, query, salt, credential.secret);
        let params = [
            ("q", query.to_string()),
            ("from", "auto".to_string()),
            ("to", self.target_lang.clone()),
            ("appid", credential.appid.to_string()),
            ("salt", salt.to_string()),
            ("sign", sign),
        ];
        let encoded = params
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.endpoint, encoded)
    }
}

struct Credential<'a> {
    appid: &'a str,
    secret: &'a str,
}

/// Split an `appid:secret` credential, rejecting malformed input up front
/// instead of letting the remote call fail opaquely.
fn parse_credential(credential: &str) -> Result<Credential<'_>> {
    match credential.split_once(':') {
        Some((appid, secret)) if !appid.is_empty() && !secret.is_empty() => {
            Ok(Credential { appid, secret })
        }
        _ => Err(CoreError::CredentialMalformed {
            provider: "baidu".to_string(),
            reason: "expected appid:secret".to_string(),
        }),
    }
}

/// Compute the request signature: `md5(appid + query + salt + secret)`
fn sign_request(appid: &str, query: &str, salt: i64, secret: &str) -> String {
    format!("{:x}", md5::compute(format!("{appid}{query}{salt}{secret}")))
}

#[derive(Debug, Deserialize)]
struct BaiduResponse {
    trans_result: Option<Vec<TransResultItem>>,
    error_code: Option<String>,
    error_msg: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TransResultItem {
    dst: String,
}

/// Re-attach translated texts to the original start times by positional
/// index. `None` when the result count does not match the input, so a
/// partial response can never surface as a length mismatch or reordering.
fn reshape(lines: &[LyricLine], response: BaiduResponse) -> Option<Vec<LyricLine>> {
    let Some(results) = response.trans_result else {
        if let Some(code) = response.error_code {
            warn!(
                target: LOG_TARGET,
                "Baidu returned error {}: {}",
                code,
                response.error_msg.unwrap_or_default()
            );
        }
        return None;
    };

    if results.len() != lines.len() {
        warn!(
            target: LOG_TARGET,
            "Baidu returned {} results for {} lines, discarding",
            results.len(),
            lines.len()
        );
        return None;
    }

    Some(
        lines
            .iter()
            .zip(results)
            .map(|(line, item)| LyricLine::new(line.start_time, item.dst))
            .collect(),
    )
}

#[async_trait]
impl Translator for BaiduTranslator {
    fn name(&self) -> &'static str {
        "baidu"
    }

    async fn translate(
        &self,
        lines: &[LyricLine],
        credential: &str,
    ) -> Result<Option<Vec<LyricLine>>> {
        if lines.is_empty() {
            return Ok(None);
        }
        debug_assert!(is_time_ordered(lines), "input lines must be time-ordered");

        let credential = parse_credential(credential)?;
        let query = join_texts(lines);
        let salt = chrono::Utc::now().timestamp_millis();
        let url = self.build_url(&credential, &query, salt);

        debug!(target: LOG_TARGET, "Translating {} lines via Baidu", lines.len());

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(CoreError::ProviderFailed {
                provider: self.name().to_string(),
                reason: format!("Baidu returned status: {}", response.status()),
            });
        }

        let parsed: BaiduResponse = response.json().await?;
        Ok(reshape(lines, parsed))
    }
}
