//! Error types for debate-forge operations.
//!
//! Defines error types for the major subsystems:
//! - Text-generation backend calls
//! - Debate training sessions and their storage
//! - The tutorial quiz
//!
//! The response parser has no error type; malformed model output yields
//! an empty result.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during LLM operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Missing API base URL: LITELLM_API_BASE environment variable not set")]
    MissingApiBase,

    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse LLM response: {0}")]
    ParseError(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("API error ({code}): {message}")]
    ApiError { code: u16, message: String },
}

/// Errors that can occur while running a debate training session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Conversation '{0}' not found")]
    ConversationNotFound(Uuid),

    #[error("Invalid topic ID: {0}")]
    InvalidTopic(u32),

    #[error("No user text provided")]
    EmptyUtterance,

    #[error("No rounds found in conversation '{0}'")]
    NoRounds(Uuid),

    #[error("Debate session '{0}' not found")]
    DebateNotFound(Uuid),

    #[error("Speaker '{speaker_id}' is not a participant in debate '{debate_id}'")]
    NotParticipant { debate_id: Uuid, speaker_id: String },

    #[error("Invalid participants: {0}")]
    InvalidParticipants(String),

    #[error("Agent error: {0}")]
    Agent(#[from] crate::agents::AgentError),

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<sqlx::Error> for SessionError {
    fn from(err: sqlx::Error) -> Self {
        SessionError::Storage(err.to_string())
    }
}

/// Result type alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur in the tutorial quiz.
#[derive(Debug, Error)]
pub enum TutorialError {
    #[error("Invalid question ID: {0}")]
    UnknownQuestion(u32),

    #[error("Duplicate question ID '{0}' found during loading")]
    DuplicateQuestion(u32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
