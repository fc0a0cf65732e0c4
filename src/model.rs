//! Model descriptions and selection keys.

use serde::{Deserialize, Serialize};

/// Describes one selectable model.
///
/// Value object: built once (statically or from a dynamic listing) and
/// never mutated. The serialized form is `camelCase` to match the settings
/// files hosts typically feed this crate from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub reasoning: bool,
    #[serde(default = "default_input")]
    pub input: Vec<InputType>,
    #[serde(default = "default_context_window")]
    pub context_window: u32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

/// Input types accepted by a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Text,
    Image,
}

fn default_input() -> Vec<InputType> {
    vec![InputType::Text]
}

const fn default_context_window() -> u32 {
    128_000
}

const fn default_max_tokens() -> u32 {
    16_384
}

impl ModelInfo {
    /// A text-only, non-reasoning model with default limits. Dynamic
    /// listings that carry nothing but an identifier go through here.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            reasoning: false,
            input: default_input(),
            context_window: default_context_window(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Identifies one model on one provider.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ModelKey {
    pub provider: String,
    pub id: String,
}

impl ModelKey {
    #[must_use]
    pub fn new(provider: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            id: id.into(),
        }
    }

    /// `provider/model` form used by selection UIs and settings files.
    #[must_use]
    pub fn full_id(&self) -> String {
        format!("{}/{}", self.provider, self.id)
    }
}

impl std::fmt::Display for ModelKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.provider, self.id)
    }
}

impl std::str::FromStr for ModelKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((provider, id)) if !provider.is_empty() && !id.is_empty() => Ok(Self {
                provider: provider.to_string(),
                id: id.to_string(),
            }),
            _ => Err(format!("expected `provider/model`, got `{s}`")),
        }
    }
}
