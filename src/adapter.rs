//! Provider adapters: endpoint resolution and model-list caching.
//!
//! An adapter owns one provider's static configuration, an environment
//! snapshot, and a driver implementing the provider-specific operations.
//! Everything here is synchronous except the dynamic model fetch, which
//! suspends only at the network boundary.

use crate::env::EnvSnapshot;
use crate::error::{Error, Result};
use crate::handle::{LanguageModel, ModelHandleOptions};
use crate::model::ModelInfo;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

// ============================================================================
// Resolution inputs
// ============================================================================

/// Per-provider overrides supplied by the host, e.g. from its settings
/// file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Caller-supplied material for endpoint resolution and cache keying.
///
/// Transient: adapters never retain it, only the fingerprint derived from
/// it. `BTreeMap` keeps serialization order stable, which the fingerprint
/// depends on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolutionInputs {
    /// Provider id -> secret.
    pub api_keys: BTreeMap<String, String>,
    /// Provider id -> per-provider overrides.
    pub provider_settings: BTreeMap<String, ProviderSettings>,
    /// Environment forwarded from a managing server process.
    pub server_env: BTreeMap<String, String>,
}

impl ResolutionInputs {
    pub fn set_api_key(&mut self, provider: impl Into<String>, key: impl Into<String>) -> &mut Self {
        self.api_keys.insert(provider.into(), key.into());
        self
    }

    pub fn set_base_url(&mut self, provider: impl Into<String>, url: impl Into<String>) -> &mut Self {
        self.provider_settings
            .entry(provider.into())
            .or_default()
            .base_url = Some(url.into());
        self
    }

    pub fn set_server_env(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.server_env.insert(name.into(), value.into());
        self
    }
}

/// Resolved connection configuration for one provider.
///
/// Both fields may be absent; that is not an error at this layer. Failure
/// surfaces downstream when something tries to use the missing piece.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

// ============================================================================
// Provider configuration
// ============================================================================

/// Static, immutable settings for one provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Canonical provider id (`openai`, `anthropic`, ...).
    pub id: String,
    /// Human-readable label for selection UIs.
    pub label: String,
    /// Fallback base URL when no other source yields one.
    pub default_base_url: Option<String>,
    /// Env var consulted for a base URL override. `{ID}_BASE_URL` when
    /// unset.
    pub base_url_env: Option<String>,
    /// Env var consulted for the API key. `{ID}_API_KEY` when unset.
    pub api_key_env: Option<String>,
    /// Send the key as `Authorization: Bearer` (true) or `x-api-key`
    /// (false).
    pub auth_header: bool,
    /// Built-in model list, served when no dynamic listing is available.
    pub static_models: Vec<ModelInfo>,
}

impl ProviderConfig {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            default_base_url: None,
            base_url_env: None,
            api_key_env: None,
            auth_header: true,
            static_models: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_default_base_url(mut self, url: impl Into<String>) -> Self {
        self.default_base_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_base_url_env(mut self, name: impl Into<String>) -> Self {
        self.base_url_env = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_api_key_env(mut self, name: impl Into<String>) -> Self {
        self.api_key_env = Some(name.into());
        self
    }

    #[must_use]
    pub const fn with_auth_header(mut self, auth_header: bool) -> Self {
        self.auth_header = auth_header;
        self
    }

    #[must_use]
    pub fn with_static_models(mut self, models: Vec<ModelInfo>) -> Self {
        self.static_models = models;
        self
    }

    /// Env var name holding a base URL override for this provider.
    #[must_use]
    pub fn base_url_env_name(&self) -> String {
        self.base_url_env
            .clone()
            .unwrap_or_else(|| default_env_name(&self.id, "BASE_URL"))
    }

    /// Env var name holding the API key for this provider.
    #[must_use]
    pub fn api_key_env_name(&self) -> String {
        self.api_key_env
            .clone()
            .unwrap_or_else(|| default_env_name(&self.id, "API_KEY"))
    }
}

fn default_env_name(provider_id: &str, suffix: &str) -> String {
    let prefix: String = provider_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{prefix}_{suffix}")
}

// ============================================================================
// Driver trait
// ============================================================================

/// Provider-specific construction and discovery.
///
/// `create_model_handle` is the sole mandatory operation. Dynamic model
/// listing is an explicit capability: implementations that override
/// [`Self::fetch_dynamic_models`] must also report it via
/// [`Self::supports_dynamic_models`], and callers check the flag before
/// invoking the fetch.
#[async_trait]
pub trait ProviderDriver: Send + Sync {
    /// Build a callable handle for `model_id` against the resolved
    /// endpoint.
    fn create_model_handle(
        &self,
        config: &ProviderConfig,
        endpoint: &ResolvedEndpoint,
        model_id: &str,
    ) -> Result<Box<dyn LanguageModel>>;

    /// Whether [`Self::fetch_dynamic_models`] is implemented.
    fn supports_dynamic_models(&self) -> bool {
        false
    }

    /// Fetch the provider's current model list from its API.
    async fn fetch_dynamic_models(
        &self,
        config: &ProviderConfig,
        endpoint: &ResolvedEndpoint,
    ) -> Result<Vec<ModelInfo>> {
        let _ = endpoint;
        Err(Error::dynamic_models_unsupported(config.id.clone()))
    }
}

// ============================================================================
// Adapter
// ============================================================================

#[derive(Debug, Clone)]
struct CachedModelSet {
    fingerprint: String,
    models: Vec<ModelInfo>,
}

/// One provider's resolution and caching state.
///
/// Cache mutation happens behind `&mut self` with no intermediate await
/// point, so a single request path never observes a half-updated cache.
/// Instances are not internally synchronized; give each logical request
/// path its own adapter or wrap the registry in external locking.
pub struct ProviderAdapter {
    config: ProviderConfig,
    env: Arc<EnvSnapshot>,
    driver: Arc<dyn ProviderDriver>,
    cache: Option<CachedModelSet>,
}

impl std::fmt::Debug for ProviderAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderAdapter")
            .field("config", &self.config)
            .field("cached", &self.cache.is_some())
            .finish_non_exhaustive()
    }
}

impl ProviderAdapter {
    #[must_use]
    pub fn new(
        config: ProviderConfig,
        env: Arc<EnvSnapshot>,
        driver: Arc<dyn ProviderDriver>,
    ) -> Self {
        Self {
            config,
            env,
            driver,
            cache: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.config.id
    }

    #[must_use]
    pub const fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Resolve the connection configuration for this provider.
    ///
    /// Base URL, first non-empty wins: per-provider setting, server env,
    /// live process env, startup snapshot, static default. API key, first
    /// present wins: caller key map, server env, live process env, startup
    /// snapshot. The resolved base URL never carries a trailing slash.
    #[must_use]
    pub fn resolve_endpoint(&self, inputs: &ResolutionInputs) -> ResolvedEndpoint {
        ResolvedEndpoint {
            base_url: self.resolve_base_url(inputs),
            api_key: self.resolve_api_key(inputs),
        }
    }

    fn resolve_base_url(&self, inputs: &ResolutionInputs) -> Option<String> {
        let env_name = self.config.base_url_env_name();
        let raw = non_empty(
            inputs
                .provider_settings
                .get(&self.config.id)
                .and_then(|settings| settings.base_url.clone()),
        )
        .or_else(|| non_empty(inputs.server_env.get(&env_name).cloned()))
        .or_else(|| non_empty(std::env::var(&env_name).ok()))
        .or_else(|| non_empty(self.env.get(&env_name).map(str::to_string)))
        .or_else(|| non_empty(self.config.default_base_url.clone()))?;
        Some(raw.trim_end_matches('/').to_string())
    }

    fn resolve_api_key(&self, inputs: &ResolutionInputs) -> Option<String> {
        let env_name = self.config.api_key_env_name();
        inputs
            .api_keys
            .get(&self.config.id)
            .cloned()
            .or_else(|| inputs.server_env.get(&env_name).cloned())
            .or_else(|| std::env::var(&env_name).ok())
            .or_else(|| self.env.get(&env_name).map(str::to_string))
    }

    /// Cache-validity key: canonical JSON of this provider's entry in the
    /// key map, this provider's settings entry, and the whole server env.
    /// Entries belonging to other providers do not participate.
    #[must_use]
    pub fn fingerprint(&self, inputs: &ResolutionInputs) -> String {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Material<'a> {
            api_key: Option<&'a String>,
            settings: Option<&'a ProviderSettings>,
            server_env: &'a BTreeMap<String, String>,
        }

        let material = Material {
            api_key: inputs.api_keys.get(&self.config.id),
            settings: inputs.provider_settings.get(&self.config.id),
            server_env: &inputs.server_env,
        };
        serde_json::to_string(&material).unwrap_or_default()
    }

    /// Read-only cache probe. Returns the cached list only while its
    /// fingerprint still matches `inputs`; a mismatch evicts the cache and
    /// the eviction is sticky. Never fetches.
    pub fn cached_models(&mut self, inputs: &ResolutionInputs) -> Option<&[ModelInfo]> {
        let fingerprint = self.fingerprint(inputs);
        let valid = self
            .cache
            .as_ref()
            .is_some_and(|cached| cached.fingerprint == fingerprint);
        if !valid {
            if self.cache.take().is_some() {
                debug!(provider = %self.config.id, "evicted stale model cache");
            }
            return None;
        }
        self.cache.as_ref().map(|cached| cached.models.as_slice())
    }

    /// Unconditionally replace the cache with `models` keyed by the
    /// fingerprint of `inputs`.
    pub fn store_models(&mut self, inputs: &ResolutionInputs, models: Vec<ModelInfo>) {
        let fingerprint = self.fingerprint(inputs);
        debug!(provider = %self.config.id, count = models.len(), "stored model cache");
        self.cache = Some(CachedModelSet {
            fingerprint,
            models,
        });
    }

    /// Whether this provider's driver implements dynamic model listing.
    #[must_use]
    pub fn supports_dynamic_models(&self) -> bool {
        self.driver.supports_dynamic_models()
    }

    /// Fetch the provider's current model list. Does not touch the cache;
    /// callers probe [`Self::cached_models`] first and call
    /// [`Self::store_models`] with the result on a miss.
    pub async fn fetch_dynamic_models(&self, inputs: &ResolutionInputs) -> Result<Vec<ModelInfo>> {
        let endpoint = self.resolve_endpoint(inputs);
        self.driver.fetch_dynamic_models(&self.config, &endpoint).await
    }

    /// The documented probe-fetch-store convention in one call: cached
    /// list if still valid, otherwise a fresh fetch (stored on success),
    /// or the static list for providers without the dynamic capability.
    ///
    /// A failed fetch propagates; the cache stays evicted, so there is no
    /// fallback to data keyed by outdated inputs.
    pub async fn models(&mut self, inputs: &ResolutionInputs) -> Result<Vec<ModelInfo>> {
        if let Some(models) = self.cached_models(inputs) {
            return Ok(models.to_vec());
        }
        if !self.supports_dynamic_models() {
            return Ok(self.config.static_models.clone());
        }
        let models = self.fetch_dynamic_models(inputs).await?;
        self.store_models(inputs, models.clone());
        Ok(models)
    }

    /// Resolve the endpoint from the options' maps and hand construction
    /// to the driver.
    pub fn create_model_handle(&self, options: &ModelHandleOptions) -> Result<Box<dyn LanguageModel>> {
        let endpoint = self.resolve_endpoint(&options.inputs);
        self.driver
            .create_model_handle(&self.config, &endpoint, &options.model)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
