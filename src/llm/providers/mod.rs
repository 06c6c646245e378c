//! Hosted-model backends beyond the plain OpenAI-compatible client.

pub mod openrouter;

pub use openrouter::OpenRouterProvider;

pub use super::litellm::LlmProvider;
