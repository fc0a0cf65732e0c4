//! Provider registry.
//!
//! Maps provider ids to adapters. Hosts start from [`ProviderRegistry::builtin`]
//! and register custom adapters on top; a later registration under an
//! existing id replaces it.

use crate::adapter::{ProviderAdapter, ProviderDriver, ResolutionInputs};
use crate::catalog::{DriverKind, PROVIDER_CATALOG};
use crate::drivers::{AnthropicDriver, OpenAiCompatibleDriver};
use crate::env::EnvSnapshot;
use crate::error::{Error, Result};
use crate::handle::{LanguageModel, ModelHandleOptions};
use crate::model::ModelKey;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct ProviderRegistry {
    adapters: BTreeMap<String, ProviderAdapter>,
}

impl ProviderRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry seeded with every catalog provider, all sharing `env`.
    #[must_use]
    pub fn builtin(env: &Arc<EnvSnapshot>) -> Self {
        let openai_compatible: Arc<dyn ProviderDriver> = Arc::new(OpenAiCompatibleDriver::new());
        let anthropic: Arc<dyn ProviderDriver> = Arc::new(AnthropicDriver);

        let mut registry = Self::new();
        for entry in PROVIDER_CATALOG {
            let driver = match entry.driver {
                DriverKind::OpenAiCompatible => Arc::clone(&openai_compatible),
                DriverKind::Anthropic => Arc::clone(&anthropic),
            };
            registry.register(ProviderAdapter::new(
                entry.to_config(),
                Arc::clone(env),
                driver,
            ));
        }
        registry
    }

    /// Register an adapter under its provider id, replacing any existing
    /// registration.
    pub fn register(&mut self, adapter: ProviderAdapter) {
        self.adapters.insert(adapter.id().to_string(), adapter);
    }

    #[must_use]
    pub fn get(&self, provider_id: &str) -> Option<&ProviderAdapter> {
        self.adapters.get(provider_id)
    }

    #[must_use]
    pub fn get_mut(&mut self, provider_id: &str) -> Option<&mut ProviderAdapter> {
        self.adapters.get_mut(provider_id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.adapters.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Build a handle for `key` using `inputs` for resolution.
    pub fn create_model_handle(
        &self,
        key: &ModelKey,
        inputs: &ResolutionInputs,
    ) -> Result<Box<dyn LanguageModel>> {
        let adapter = self
            .get(&key.provider)
            .ok_or_else(|| Error::unknown_provider(key.provider.clone()))?;
        let options = ModelHandleOptions::new(key.id.clone()).with_inputs(inputs.clone());
        adapter.create_model_handle(&options)
    }

    /// Keys of every model selectable with the given inputs: providers
    /// that resolve to an API key, listing their cached models when the
    /// cache is still valid and their static seeds otherwise. Never
    /// touches the network.
    #[must_use]
    pub fn available_models(&mut self, inputs: &ResolutionInputs) -> Vec<ModelKey> {
        let mut keys = Vec::new();
        for adapter in self.adapters.values_mut() {
            if adapter.resolve_endpoint(inputs).api_key.is_none() {
                continue;
            }
            let provider = adapter.id().to_string();
            if let Some(models) = adapter.cached_models(inputs) {
                keys.extend(
                    models
                        .iter()
                        .map(|m| ModelKey::new(provider.as_str(), m.id.as_str())),
                );
                continue;
            }
            keys.extend(
                adapter
                    .config()
                    .static_models
                    .iter()
                    .map(|m| ModelKey::new(provider.as_str(), m.id.as_str())),
            );
        }
        keys
    }
}
