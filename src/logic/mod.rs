//! Logic-expression pipeline: result types, tokenizer and response parser.
//!
//! The model is asked (see [`crate::prompts`]) to answer in two labelled
//! sections. [`parser::parse_response`] pulls the expression and the
//! performance fields out of that text, and [`tokenizer::tokenize`] compiles
//! the expression into the compact token stream consumed by the front end.
//!
//! ```
//! use debate_forge::logic::{parse_response, tokenize};
//!
//! let raw = "Logical Expression:\nA → B\n\nPerformances:\nValid: True\nSound: false\n";
//! let result = parse_response(raw, "If A then B");
//! assert_eq!(result.logical_expression, "A → B");
//! assert!(result.performance.valid);
//! assert_eq!(result.converted_tokens, tokenize("A → B"));
//! ```

pub mod markers;
pub mod parser;
pub mod tokenizer;
pub mod types;

pub use parser::parse_response;
pub use tokenizer::{lex, tokenize, LogicOperator, LogicToken};
pub use types::{LogicAnalysisResult, Performance};
