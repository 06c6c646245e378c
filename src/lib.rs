//! debate-forge: symbolic logic analysis for debate practice.
//!
//! A sentence goes through three stages:
//! 1. [`prompts`] builds the instruction prompt, optionally conditioned on
//!    earlier logical expressions from the same conversation.
//! 2. An [`llm`] backend answers; [`logic::parse_response`] turns the
//!    free-form reply into a [`logic::LogicAnalysisResult`].
//! 3. [`logic::tokenize`] maps the expression to numeric operator codes and
//!    lowercased operands.
//!
//! [`session`] layers training conversations against an AI opponent on top,
//! and [`tutorial`] holds the token-structure quiz.

pub mod agents;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod logic;
pub mod prompts;
pub mod session;
pub mod tutorial;

pub use config::{AppConfig, ConfigError};
pub use error::{LlmError, SessionError, TutorialError};
pub use logic::{parse_response, tokenize, LogicAnalysisResult, Performance};
pub use prompts::build_prompt;
