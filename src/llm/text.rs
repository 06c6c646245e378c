//! Single-prompt text generation on top of any [`LlmProvider`].
//!
//! The analysis pipeline only needs `generate(prompt) -> text`; this adapter
//! wraps the chat-message interface into that shape so the prompt builder
//! and parser never see which backend is in use.

use std::sync::Arc;

use crate::error::LlmError;
use crate::llm::{GenerationRequest, LlmProvider, Message};

/// Turns one prompt into one completion string.
#[derive(Clone)]
pub struct TextGenerator {
    provider: Arc<dyn LlmProvider>,
    model: String,
    temperature: Option<f64>,
    max_tokens: Option<u32>,
}

impl std::fmt::Debug for TextGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextGenerator")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish_non_exhaustive()
    }
}

impl TextGenerator {
    /// Uses the provider's default model and sampling settings.
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            model: String::new(),
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature.clamp(0.0, 2.0));
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Sends `prompt` as the only message, with the user role, and returns
    /// the first choice's text.
    ///
    /// # Errors
    ///
    /// Backend failures propagate unchanged; a response without choices is
    /// `LlmError::ParseError`.
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let mut request = GenerationRequest::new(self.model.clone(), vec![Message::user(prompt)]);
        if let Some(temperature) = self.temperature {
            request = request.with_temperature(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }

        let response = self.provider.generate(request).await?;
        response
            .first_content()
            .map(|s| s.to_string())
            .ok_or_else(|| LlmError::ParseError("No content in LLM response".to_string()))
    }
}
