use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    // Credential errors
    #[error("Malformed credential for {provider}: {reason}")]
    CredentialMalformed { provider: String, reason: String },

    // Remote API errors
    #[error("Rate limited by {provider}")]
    RateLimited { provider: String },

    #[error("Token refresh failed: {reason}")]
    TokenRefreshFailed { reason: String },

    #[error("Provider {provider} failed: {reason}")]
    ProviderFailed { provider: String, reason: String },

    // Network errors
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
