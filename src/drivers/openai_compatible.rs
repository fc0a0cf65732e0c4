//! Driver for OpenAI-protocol-compatible providers.
//!
//! Handles are bearer-authenticated; the dynamic model listing uses the
//! standard `GET {base}/models` endpoint and its `{"data": [...]}` shape.

use crate::adapter::{ProviderConfig, ProviderDriver, ResolvedEndpoint};
use crate::error::{Error, Result};
use crate::handle::{HttpModelHandle, LanguageModel};
use crate::model::ModelInfo;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

const ERROR_EXCERPT_LIMIT: usize = 600;

#[derive(Debug, Clone, Default)]
pub struct OpenAiCompatibleDriver {
    client: reqwest::Client,
}

impl OpenAiCompatibleDriver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Deserialize)]
struct ModelListResponse {
    #[serde(default)]
    data: Vec<ModelListEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelListEntry {
    id: String,
}

#[async_trait]
impl ProviderDriver for OpenAiCompatibleDriver {
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
        Ok(Box::new(HttpModelHandle::new(
            config.id.clone(),
            model_id,
            base_url,
            endpoint.api_key.clone(),
            config.auth_header,
        )))
    }

    fn supports_dynamic_models(&self) -> bool {
        true
    }

    async fn fetch_dynamic_models(
        &self,
        config: &ProviderConfig,
        endpoint: &ResolvedEndpoint,
    ) -> Result<Vec<ModelInfo>> {
        let base_url = endpoint
            .base_url
            .as_deref()
            .ok_or_else(|| Error::missing_base_url(config.id.clone()))?;
        let url = format!("{}/models", base_url.trim_end_matches('/'));

        let mut request = self.client.get(&url);
        if let Some(key) = &endpoint.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = excerpt(&response.text().await.unwrap_or_default());
            return Err(Error::Api {
                provider: config.id.clone(),
                status: status.as_u16(),
                message,
            });
        }

        let list: ModelListResponse = response.json().await?;
        debug!(provider = %config.id, count = list.data.len(), "fetched dynamic model list");
        Ok(list
            .data
            .into_iter()
            .map(|entry| ModelInfo::new(entry.id.clone(), entry.id))
            .collect())
    }
}

fn excerpt(body: &str) -> String {
    if body.len() <= ERROR_EXCERPT_LIMIT {
        return body.to_string();
    }
    let mut end = ERROR_EXCERPT_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    body[..end].to_string()
}
