//! Driver implementations.
//!
//! This module contains concrete implementations of the
//! [`crate::adapter::ProviderDriver`] trait for the supported API
//! families.

pub mod anthropic;
pub mod openai_compatible;

pub use anthropic::AnthropicDriver;
pub use openai_compatible::OpenAiCompatibleDriver;
