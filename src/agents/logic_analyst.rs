//! Logic Analyst agent.
//!
//! Runs one sentence through the analysis pipeline: build the prompt, make a
//! single model call, parse the reply into a [`LogicAnalysisResult`].
//! The model call is the only fallible step; unusable model text becomes the
//! empty result, which callers detect with [`LogicAnalysisResult::is_empty`].

use std::sync::Arc;

use super::error::AgentResult;
use crate::llm::{LlmProvider, TextGenerator};
use crate::logic::{parse_response, LogicAnalysisResult};
use crate::prompts::AnalysisPromptBuilder;

/// Configuration for the Logic Analyst.
#[derive(Debug, Clone)]
pub struct LogicAnalystConfig {
    /// Model identifier; empty uses the backend default.
    pub model: String,
    /// Temperature for LLM generation.
    pub temperature: f64,
    /// Maximum tokens for LLM response.
    pub max_tokens: u32,
}

impl Default for LogicAnalystConfig {
    fn default() -> Self {
        Self {
            model: String::new(),
            temperature: 0.7,
            max_tokens: 500,
        }
    }
}

impl LogicAnalystConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the temperature for LLM generation.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature.clamp(0.0, 2.0);
        self
    }

    /// Sets the maximum tokens for LLM response.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Agent that turns natural-language arguments into logic analyses.
///
/// Holds no per-call state, so one instance can serve concurrent analyses.
#[derive(Debug, Clone)]
pub struct LogicAnalyst {
    generator: TextGenerator,
    prompt_builder: AnalysisPromptBuilder,
}

impl LogicAnalyst {
    /// Agent name constant for identification.
    pub const AGENT_NAME: &'static str = "logic_analyst";

    pub fn new(llm_client: Arc<dyn LlmProvider>, config: LogicAnalystConfig) -> Self {
        let generator = TextGenerator::new(llm_client)
            .with_model(config.model)
            .with_temperature(config.temperature)
            .with_max_tokens(config.max_tokens);

        Self {
            generator,
            prompt_builder: AnalysisPromptBuilder::default(),
        }
    }

    pub fn with_defaults(llm_client: Arc<dyn LlmProvider>) -> Self {
        Self::new(llm_client, LogicAnalystConfig::default())
    }

    /// Swaps the instruction block used in prompts.
    pub fn with_prompt_builder(mut self, prompt_builder: AnalysisPromptBuilder) -> Self {
        self.prompt_builder = prompt_builder;
        self
    }

    /// Analyzes `sentence`, using `prior_expressions` as conversation context.
    ///
    /// # Errors
    ///
    /// Only when the model call itself fails. Output missing the section
    /// headers yields `Ok` with the empty result.
    pub async fn analyze(
        &self,
        sentence: &str,
        prior_expressions: &[String],
    ) -> AgentResult<LogicAnalysisResult> {
        let prompt = self.prompt_builder.build(sentence, prior_expressions);
        let raw = self.generator.generate(&prompt).await?;
        let result = parse_response(&raw, sentence);

        if result.is_empty() {
            tracing::warn!(
                agent = Self::AGENT_NAME,
                response_len = raw.len(),
                "Model output had no usable logical expression"
            );
        } else {
            tracing::debug!(
                agent = Self::AGENT_NAME,
                tokens = result.converted_tokens.len(),
                valid = result.performance.valid,
                sound = result.performance.sound,
                "Sentence analyzed"
            );
        }

        Ok(result)
    }
}
