//! Command-line interface for debate-forge.
//!
//! Provides one-shot analysis, offline prompt/parse/tokenize helpers,
//! interactive training and the tutorial quiz.

mod commands;

pub use commands::{parse_cli, run, run_with_cli, Cli};
