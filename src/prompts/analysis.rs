//! Prompt builder for the logic-analysis request.
//!
//! The rendered prompt has four parts, always in this order: the role
//! preamble, an optional block of previous expressions from the same
//! conversation, the instruction block naming every section header from
//! [`crate::logic::markers`], and the quoted sentence under analysis.

use std::borrow::Cow;

const PREAMBLE: &str =
    "You are an AI assistant that analyzes the logical structure of a sentence and identifies logical errors.";

const PREVIOUS_EXPRESSIONS_HEADER: &str = "Previous Logical Expressions:";

const INTEGRATE_CONTEXT_LINE: &str =
    "Now, please integrate the previous analysis with the new sentence and analyze it.";

/// Default instruction block: section layout plus three worked examples.
///
/// Header strings must stay identical to [`crate::logic::markers`]; the
/// tests in this module check that they do.
pub const ANALYSIS_INSTRUCTIONS: &str = r#"
- Logical Expression
  Provide the logical expression of the sentence. Keep the phrases as they are; use only the symbols → (implies), ∧ (and), ∨ (or), ~ (not), ↔ (if and only if) and parentheses () to represent their relationships.
- Performances
  Provide the performance analysis with the following sub-sections:
    - Valid: True/False
    - Valid Explanation: Provide explanation if invalid; leave empty if valid
    - Sound: True/False
    - Sound Explanation: Provide explanation if unsound; leave empty if sound

For example, given the sentence: "If either consumer spending falls or unemployment rises, then the economy will not improve and interest rates will not rise.", your output might look like:

Logical Expression:
Consumer spending falls ∨ unemployment rises → (~ economy improve ∧ interest rates rise)

Performances:
Valid: True
Valid Explanation:
Sound: False
Sound Explanation: It's not necessarily true that consumer spending falling or unemployment rising will cause the economy to worsen.

Given the sentence: "If it rained last night, then my lawn is wet this morning. It did not rain last night, so, my lawn is not wet this morning.", your output might look like:

Logical Expression:
(It rained last night → my lawn is wet this morning ∧ ~ it rained last night) → ~ my lawn is wet this morning

Performances:
Valid: False
Valid Explanation: The argument denies the antecedent: a false antecedent does not make the consequent of a conditional false.
Sound: False
Sound Explanation: An argument is sound if and only if it is valid and all premises are true. Since it's invalid, it's unsound.

Given the sentence: "If the mind and brain are identical, then the brain is a physical entity if and only if the mind is a physical entity. If the mind is a physical entity, then thoughts are material entities. Thoughts are not material, but the brain is a physical entity. Therefore, the mind and the brain are not identical.", your output might look like:

Logical Expression:
((Mind and brain are identical → (brain is a physical entity ↔ mind is a physical entity)) ∧ (mind is a physical entity → thoughts are material) ∧ (~ thoughts are material ∧ brain is a physical entity) → ~ mind and brain are identical

Performances:
Valid: True
Valid Explanation:
Sound: True
Sound Explanation:
"#;

/// Renders analysis prompts with a configurable instruction block.
#[derive(Debug, Clone)]
pub struct AnalysisPromptBuilder {
    instructions: Cow<'static, str>,
}

impl Default for AnalysisPromptBuilder {
    fn default() -> Self {
        Self {
            instructions: Cow::Borrowed(ANALYSIS_INSTRUCTIONS),
        }
    }
}

impl AnalysisPromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the instruction block.
    ///
    /// Custom text must still ask for every header in
    /// [`crate::logic::markers::ALL`], or the parser will reject the output.
    pub fn with_instructions(mut self, instructions: impl Into<Cow<'static, str>>) -> Self {
        self.instructions = instructions.into();
        self
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Renders the prompt for `sentence`, conditioned on earlier expressions.
    ///
    /// Pure: the same inputs always give the same string. The sentence is
    /// not validated.
    pub fn build(&self, sentence: &str, prior_expressions: &[String]) -> String {
        let mut prompt = String::with_capacity(self.instructions.len() + sentence.len() + 256);
        prompt.push_str(PREAMBLE);
        prompt.push('\n');

        if prior_expressions.is_empty() {
            prompt.push_str(&self.instructions);
        } else {
            prompt.push_str(PREVIOUS_EXPRESSIONS_HEADER);
            prompt.push('\n');
            for expression in prior_expressions {
                prompt.push_str(expression);
                prompt.push('\n');
            }
            prompt.push('\n');
            prompt.push_str(&self.instructions);
            prompt.push('\n');
            prompt.push_str(INTEGRATE_CONTEXT_LINE);
        }

        prompt.push_str("\n\nNow, analyze this sentence:\n\"");
        prompt.push_str(sentence);
        prompt.push_str("\"\n");
        prompt
    }
}

/// Builds the analysis prompt with the default instruction block.
pub fn build_prompt(sentence: &str, prior_expressions: &[String]) -> String {
    AnalysisPromptBuilder::default().build(sentence, prior_expressions)
}
