//! Driver for the Anthropic Messages API family.
//!
//! Auth travels in `x-api-key` and requests pin an `anthropic-version`.
//! Anthropic has no public model-listing endpoint at this layer, so the
//! dynamic capability stays off and callers get the static list.

use crate::adapter::{ProviderConfig, ProviderDriver, ResolvedEndpoint};
use crate::error::{Error, Result};
use crate::handle::{HttpModelHandle, LanguageModel};
use async_trait::async_trait;

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone, Copy, Default)]
pub struct AnthropicDriver;

#[async_trait]
impl ProviderDriver for AnthropicDriver {
    fn create_model_handle(
        &self,
        config: &ProviderConfig,
        endpoint: &ResolvedEndpoint,
        model_id: &str,
    ) -> Result<Box<dyn LanguageModel>> {
        let base_url = endpoint
            .base_url
            .clone()
            .ok_or_else(|| Error::missing_base_url(config.id.clone()))?;
        Ok(Box::new(
            HttpModelHandle::new(
                config.id.clone(),
                model_id,
                base_url,
                endpoint.api_key.clone(),
                config.auth_header,
            )
            .with_header("anthropic-version", ANTHROPIC_VERSION),
        ))
    }
}
