//! Connection-config resolution and model-list caching for pluggable LLM
//! providers.
//!
//! This crate sits between a host application and provider SDK/HTTP
//! clients. For each provider it resolves a base URL and API key from
//! precedence-ordered sources (caller-supplied settings, a forwarded
//! server environment, the live process environment, a startup snapshot,
//! and static defaults), caches dynamically fetched model lists keyed by
//! a fingerprint of the inputs that could change them, and constructs
//! callable model handles. It owns no wire protocol.
//!
//! ```
//! use provider_hub::{EnvSnapshot, ProviderRegistry, ResolutionInputs};
//!
//! let env = EnvSnapshot::capture_shared();
//! let registry = ProviderRegistry::builtin(&env);
//!
//! let mut inputs = ResolutionInputs::default();
//! inputs.set_api_key("openai", "sk-example");
//!
//! let endpoint = registry.get("openai").unwrap().resolve_endpoint(&inputs);
//! assert_eq!(endpoint.api_key.as_deref(), Some("sk-example"));
//! ```

pub mod adapter;
pub mod catalog;
pub mod drivers;
pub mod env;
pub mod error;
pub mod handle;
pub mod model;
pub mod registry;

pub use adapter::{
    ProviderAdapter, ProviderConfig, ProviderDriver, ProviderSettings, ResolutionInputs,
    ResolvedEndpoint,
};
pub use env::EnvSnapshot;
pub use error::{Error, Result};
pub use handle::{
    HttpModelHandle, LanguageModel, ModelHandleOptions, openai_compatible_handle,
};
pub use model::{InputType, ModelInfo, ModelKey};
pub use registry::ProviderRegistry;
