//! Error types for the analyst and opponent agents.

use thiserror::Error;

use crate::error::LlmError;

/// Errors that can occur during agent operations.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Error from the LLM provider.
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// The model answered but produced nothing usable.
    #[error("Failed to parse LLM response: {0}")]
    ResponseParseError(String),
}

/// Result type alias for agent operations.
pub type AgentResult<T> = Result<T, AgentError>;
