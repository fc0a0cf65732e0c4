//! Crate-wide error type.
//!
//! Missing configuration (no base URL, no API key) is deliberately not an
//! error during resolution; it only surfaces here when an operation that
//! needs the missing piece is attempted.

use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid or unusable configuration supplied by the host.
    #[error("config error: {0}")]
    Config(String),

    /// No adapter registered under the requested provider id.
    #[error("unknown provider `{provider}`")]
    UnknownProvider { provider: String },

    /// The provider has no base URL from any resolution source.
    #[error("provider `{provider}` has no base URL configured")]
    MissingBaseUrl { provider: String },

    /// Dynamic model listing was requested from a provider that only
    /// carries a static model list.
    #[error("provider `{provider}` does not support dynamic model listing")]
    DynamicModelsUnsupported { provider: String },

    /// Transport-level HTTP failure (connect, TLS, timeout, body read).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from a provider API.
    #[error("provider `{provider}` returned status {status}: {message}")]
    Api {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn unknown_provider(provider: impl Into<String>) -> Self {
        Self::UnknownProvider {
            provider: provider.into(),
        }
    }

    pub fn missing_base_url(provider: impl Into<String>) -> Self {
        Self::MissingBaseUrl {
            provider: provider.into(),
        }
    }

    pub fn dynamic_models_unsupported(provider: impl Into<String>) -> Self {
        Self::DynamicModelsUnsupported {
            provider: provider.into(),
        }
    }
}
