//! Text-generation backends for debate-forge.
//!
//! Every backend implements [`LlmProvider`]; the rest of the crate holds an
//! `Arc<dyn LlmProvider>` and never knows which one is in use.
//!
//! ```ignore
//! use debate_forge::llm::{LiteLlmClient, TextGenerator};
//! use std::sync::Arc;
//!
//! let client = Arc::new(LiteLlmClient::openai(api_key));
//! let generator = TextGenerator::new(client).with_temperature(0.7);
//! let text = generator.generate("Say hello").await?;
//! ```
//!
//! Backends:
//! - [`LiteLlmClient`] - any OpenAI-compatible endpoint, with OpenAI and
//!   DeepSeek presets
//! - [`OpenRouterProvider`] - OpenRouter with retry on transient failures

pub mod litellm;
pub mod providers;
pub mod text;

pub use litellm::{
    Choice, GenerationRequest, GenerationResponse, LiteLlmClient, LlmProvider, Message, Usage,
};
pub use providers::OpenRouterProvider;
pub use text::TextGenerator;
