//! Built-in provider catalog.
//!
//! Data-first: canonical ids, default endpoints, auth styles, and static
//! model seeds live in one table so resolution, selection, and handle
//! construction can't drift independently.

use crate::adapter::ProviderConfig;
use crate::model::{InputType, ModelInfo};

/// Which driver family serves a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverKind {
    OpenAiCompatible,
    Anthropic,
}

#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub label: &'static str,
    pub default_base_url: &'static str,
    /// `Authorization: Bearer` (true) or `x-api-key` (false).
    pub auth_header: bool,
    pub driver: DriverKind,
    pub models: &'static [StaticModel],
}

/// Seed model carried for providers without (or alongside) a dynamic
/// listing.
#[derive(Debug, Clone, Copy)]
pub struct StaticModel {
    pub id: &'static str,
    pub name: &'static str,
    pub reasoning: bool,
    pub image_input: bool,
    pub context_window: u32,
    pub max_tokens: u32,
}

const ANTHROPIC_MODELS: &[StaticModel] = &[
    StaticModel {
        id: "claude-sonnet-4-5",
        name: "Claude Sonnet 4.5",
        reasoning: true,
        image_input: true,
        context_window: 200_000,
        max_tokens: 8192,
    },
    StaticModel {
        id: "claude-opus-4-5",
        name: "Claude Opus 4.5",
        reasoning: true,
        image_input: true,
        context_window: 200_000,
        max_tokens: 8192,
    },
    StaticModel {
        id: "claude-haiku-4-5",
        name: "Claude Haiku 4.5",
        reasoning: false,
        image_input: true,
        context_window: 200_000,
        max_tokens: 8192,
    },
];

const OPENAI_MODELS: &[StaticModel] = &[
    StaticModel {
        id: "gpt-4o",
        name: "GPT-4o",
        reasoning: true,
        image_input: true,
        context_window: 128_000,
        max_tokens: 16_384,
    },
    StaticModel {
        id: "gpt-4o-mini",
        name: "GPT-4o Mini",
        reasoning: true,
        image_input: true,
        context_window: 128_000,
        max_tokens: 16_384,
    },
];

pub const PROVIDER_CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        id: "anthropic",
        label: "Anthropic",
        default_base_url: "https://api.anthropic.com/v1",
        auth_header: false,
        driver: DriverKind::Anthropic,
        models: ANTHROPIC_MODELS,
    },
    CatalogEntry {
        id: "openai",
        label: "OpenAI",
        default_base_url: "https://api.openai.com/v1",
        auth_header: true,
        driver: DriverKind::OpenAiCompatible,
        models: OPENAI_MODELS,
    },
    CatalogEntry {
        id: "openrouter",
        label: "OpenRouter",
        default_base_url: "https://openrouter.ai/api/v1",
        auth_header: true,
        driver: DriverKind::OpenAiCompatible,
        models: &[],
    },
    CatalogEntry {
        id: "groq",
        label: "Groq",
        default_base_url: "https://api.groq.com/openai/v1",
        auth_header: true,
        driver: DriverKind::OpenAiCompatible,
        models: &[],
    },
    CatalogEntry {
        id: "cerebras",
        label: "Cerebras",
        default_base_url: "https://api.cerebras.ai/v1",
        auth_header: true,
        driver: DriverKind::OpenAiCompatible,
        models: &[],
    },
    CatalogEntry {
        id: "xai",
        label: "xAI",
        default_base_url: "https://api.x.ai/v1",
        auth_header: true,
        driver: DriverKind::OpenAiCompatible,
        models: &[],
    },
    CatalogEntry {
        id: "mistral",
        label: "Mistral",
        default_base_url: "https://api.mistral.ai/v1",
        auth_header: true,
        driver: DriverKind::OpenAiCompatible,
        models: &[],
    },
];

/// Look up a catalog entry by canonical id.
#[must_use]
pub fn catalog_entry(provider_id: &str) -> Option<&'static CatalogEntry> {
    PROVIDER_CATALOG.iter().find(|entry| entry.id == provider_id)
}

impl StaticModel {
    #[must_use]
    pub fn to_model_info(&self) -> ModelInfo {
        ModelInfo {
            id: self.id.to_string(),
            name: self.name.to_string(),
            reasoning: self.reasoning,
            input: if self.image_input {
                vec![InputType::Text, InputType::Image]
            } else {
                vec![InputType::Text]
            },
            context_window: self.context_window,
            max_tokens: self.max_tokens,
        }
    }
}

impl CatalogEntry {
    /// Materialize this entry as an adapter configuration.
    #[must_use]
    pub fn to_config(&self) -> ProviderConfig {
        ProviderConfig::new(self.id, self.label)
            .with_default_base_url(self.default_base_url)
            .with_auth_header(self.auth_header)
            .with_static_models(self.models.iter().map(StaticModel::to_model_info).collect())
    }
}
