//! Opponent agent: the automated debater that argues the other side.

use std::sync::Arc;

use super::error::{AgentError, AgentResult};
use crate::llm::{GenerationRequest, LlmProvider, Message};
use crate::prompts::build_opponent_system_prompt;
use crate::session::{DebateTopic, Side};

/// One earlier exchange: what the user said and how the opponent answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub user: String,
    pub opponent: String,
}

/// Configuration for the Opponent agent.
#[derive(Debug, Clone)]
pub struct OpponentConfig {
    /// Model identifier; empty uses the backend default.
    pub model: String,
    pub temperature: f64,
    /// Kept small so replies stay short enough to speak aloud.
    pub max_tokens: u32,
}

impl Default for OpponentConfig {
    fn default() -> Self {
        Self {
            model: String::new(),
            temperature: 0.7,
            max_tokens: 100,
        }
    }
}

impl OpponentConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature.clamp(0.0, 2.0);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Generates in-character counterarguments.
pub struct OpponentAgent {
    llm_client: Arc<dyn LlmProvider>,
    config: OpponentConfig,
}

impl std::fmt::Debug for OpponentAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpponentAgent")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl OpponentAgent {
    /// Agent name constant for identification.
    pub const AGENT_NAME: &'static str = "opponent";

    pub fn new(llm_client: Arc<dyn LlmProvider>, config: OpponentConfig) -> Self {
        Self { llm_client, config }
    }

    pub fn with_defaults(llm_client: Arc<dyn LlmProvider>) -> Self {
        Self::new(llm_client, OpponentConfig::default())
    }

    /// Replies to `utterance` from the side opposite `user_side`.
    ///
    /// `history` is replayed as alternating user/assistant messages so the
    /// opponent stays consistent across rounds.
    pub async fn respond(
        &self,
        topic: &DebateTopic,
        user_side: Side,
        utterance: &str,
        history: &[Exchange],
    ) -> AgentResult<String> {
        let request = GenerationRequest::new(
            self.config.model.clone(),
            build_messages(topic, user_side, utterance, history),
        )
        .with_temperature(self.config.temperature)
        .with_max_tokens(self.config.max_tokens);

        let response = self.llm_client.generate(request).await?;
        let reply = response
            .first_content()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| AgentError::ResponseParseError("Empty LLM response".to_string()))?;

        tracing::debug!(
            agent = Self::AGENT_NAME,
            topic = topic.id,
            reply_len = reply.len(),
            "Opponent replied"
        );
        Ok(reply.to_string())
    }
}

fn build_messages(
    topic: &DebateTopic,
    user_side: Side,
    utterance: &str,
    history: &[Exchange],
) -> Vec<Message> {
    let mut messages = Vec::with_capacity(2 + history.len() * 2);
    messages.push(Message::system(build_opponent_system_prompt(topic, user_side)));
    for exchange in history {
        messages.push(Message::user(exchange.user.clone()));
        messages.push(Message::assistant(exchange.opponent.clone()));
    }
    messages.push(Message::user(utterance));
    messages
}
