//! Prompt templates sent to the text-generation backend.
//!
//! - [`analysis`] - the logic-analysis prompt whose output [`crate::logic::parse_response`] reads
//! - [`opponent`] - the system prompt for the automated opposing debater

pub mod analysis;
pub mod opponent;

pub use analysis::{build_prompt, AnalysisPromptBuilder, ANALYSIS_INSTRUCTIONS};
pub use opponent::build_opponent_system_prompt;
