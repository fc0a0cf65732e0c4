//! Callable model handles.
//!
//! A handle carries everything needed to call one model on one provider:
//! the resolved base URL, the credential and how to send it, and a shared
//! HTTP client. The wire protocol itself (request bodies, streaming
//! decode) belongs to the caller.

use crate::adapter::ResolutionInputs;
use crate::error::{Error, Result};
use reqwest::{Client, RequestBuilder};
use std::collections::BTreeMap;
use std::sync::OnceLock;
use url::Url;

/// Options for constructing a model handle through an adapter.
#[derive(Debug, Clone, Default)]
pub struct ModelHandleOptions {
    /// Model id within the provider (not the `provider/model` form).
    pub model: String,
    /// Resolution material; empty maps mean "resolve from the
    /// environment alone".
    pub inputs: ResolutionInputs,
}

impl ModelHandleOptions {
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            inputs: ResolutionInputs::default(),
        }
    }

    #[must_use]
    pub fn with_inputs(mut self, inputs: ResolutionInputs) -> Self {
        self.inputs = inputs;
        self
    }
}

/// A configured, ready-to-call handle to one model.
pub trait LanguageModel: Send + Sync {
    fn provider_id(&self) -> &str;

    fn model_id(&self) -> &str;

    fn base_url(&self) -> &str;

    /// Absolute URL for a protocol path under this handle's base URL,
    /// e.g. `/chat/completions`.
    fn endpoint_url(&self, path: &str) -> Result<Url>;

    /// Attach this handle's credentials and provider headers to an
    /// outgoing request.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder;

    /// The HTTP client this handle issues requests through.
    fn http_client(&self) -> &Client;
}

/// Process-shared HTTP client backing handles built by this crate.
pub(crate) fn shared_http_client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(Client::new)
}

/// Handle for providers speaking HTTP with header-based auth. Covers both
/// `Authorization: Bearer` and `x-api-key` styles plus fixed provider
/// headers (e.g. API version pins).
#[derive(Debug, Clone)]
pub struct HttpModelHandle {
    provider_id: String,
    model_id: String,
    base_url: String,
    api_key: Option<String>,
    auth_header: bool,
    extra_headers: BTreeMap<String, String>,
}

impl HttpModelHandle {
    #[must_use]
    pub fn new(
        provider_id: impl Into<String>,
        model_id: impl Into<String>,
        base_url: impl Into<String>,
        api_key: Option<String>,
        auth_header: bool,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            provider_id: provider_id.into(),
            model_id: model_id.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            auth_header,
            extra_headers: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

impl LanguageModel for HttpModelHandle {
    fn provider_id(&self) -> &str {
        &self.provider_id
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint_url(&self, path: &str) -> Result<Url> {
        let joined = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        Url::parse(&joined).map_err(Error::from)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let mut request = match &self.api_key {
            Some(key) if self.auth_header => request.bearer_auth(key),
            Some(key) => request.header("x-api-key", key),
            None => request,
        };
        for (name, value) in &self.extra_headers {
            request = request.header(name, value);
        }
        request
    }

    fn http_client(&self) -> &Client {
        shared_http_client()
    }
}

/// Build a handle for an OpenAI-protocol-compatible endpoint.
///
/// Pure factory over the process-shared client: no state, no caching.
/// Providers whose remote API is OpenAI-compatible construct their handles
/// through here.
#[must_use]
pub fn openai_compatible_handle(
    base_url: &str,
    api_key: Option<&str>,
    model_id: &str,
) -> HttpModelHandle {
    HttpModelHandle::new(
        "openai-compatible",
        model_id,
        base_url,
        api_key.map(str::to_string),
        true,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn build_headers(handle: &HttpModelHandle) -> reqwest::header::HeaderMap {
        let request = handle
            .http_client()
            .get(handle.endpoint_url("/models").unwrap());
        handle.authorize(request).build().unwrap().headers().clone()
    }

    #[test]
    fn endpoint_url_joins_without_doubled_slashes() {
        let handle = openai_compatible_handle("https://api.test/v1/", None, "m1");
        assert_eq!(
            handle.endpoint_url("/chat/completions").unwrap().as_str(),
            "https://api.test/v1/chat/completions"
        );
        assert_eq!(
            handle.endpoint_url("models").unwrap().as_str(),
            "https://api.test/v1/models"
        );
    }

    #[test]
    fn bearer_auth_is_applied() {
        let handle = openai_compatible_handle("https://api.test/v1", Some("sk-A"), "m1");
        let headers = build_headers(&handle);
        assert_eq!(
            headers.get("authorization").unwrap().to_str().unwrap(),
            "Bearer sk-A"
        );
        assert!(headers.get("x-api-key").is_none());
    }

    #[test]
    fn x_api_key_auth_is_applied() {
        let handle = HttpModelHandle::new(
            "anthropic",
            "claude-x",
            "https://api.test/v1",
            Some("sk-ant".to_string()),
            false,
        );
        let headers = build_headers(&handle);
        assert_eq!(
            headers.get("x-api-key").unwrap().to_str().unwrap(),
            "sk-ant"
        );
        assert!(headers.get("authorization").is_none());
    }

    #[test]
    fn no_key_means_no_auth_headers() {
        let handle = openai_compatible_handle("https://api.test/v1", None, "m1");
        let headers = build_headers(&handle);
        assert!(headers.get("authorization").is_none());
        assert!(headers.get("x-api-key").is_none());
    }

    #[test]
    fn extra_headers_are_attached() {
        let handle = HttpModelHandle::new(
            "anthropic",
            "claude-x",
            "https://api.test/v1",
            None,
            false,
        )
        .with_header("anthropic-version", "2023-06-01");
        let headers = build_headers(&handle);
        assert_eq!(
            headers.get("anthropic-version").unwrap().to_str().unwrap(),
            "2023-06-01"
        );
    }

    #[test]
    fn free_constructor_is_openai_shaped() {
        let handle = openai_compatible_handle("https://api.test/v1", Some("sk-A"), "gpt-4o");
        assert_eq!(handle.provider_id(), "openai-compatible");
        assert_eq!(handle.model_id(), "gpt-4o");
        assert_eq!(handle.base_url(), "https://api.test/v1");
        assert_eq!(handle.api_key(), Some("sk-A"));
    }
}
