//! Structured result of one logic analysis.

use serde::{Deserialize, Serialize};

use super::tokenizer::tokenize;

/// Validity and soundness judgement captured from the model.
///
/// The booleans are not computed here; they are whatever the model wrote,
/// with a missing line read as `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Performance {
    pub valid: bool,
    #[serde(default)]
    pub valid_explanation: String,
    pub sound: bool,
    #[serde(default)]
    pub sound_explanation: String,
}

/// A logical expression, its token stream and the model's assessment.
///
/// `converted_tokens` must equal `tokenize(logical_expression)`; build through
/// [`LogicAnalysisResult::from_expression`] to keep them in step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicAnalysisResult {
    pub logical_expression: String,
    #[serde(rename = "converted_logical_expression")]
    pub converted_tokens: Vec<String>,
    pub performance: Performance,
}

impl LogicAnalysisResult {
    /// Builds a result, tokenizing `expression`.
    pub fn from_expression(expression: impl Into<String>, performance: Performance) -> Self {
        let logical_expression = expression.into();
        let converted_tokens = tokenize(&logical_expression);
        Self {
            logical_expression,
            converted_tokens,
            performance,
        }
    }

    /// The canonical failure value returned when the model output is unusable.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when no expression was extracted.
    pub fn is_empty(&self) -> bool {
        self.logical_expression.is_empty()
    }
}
