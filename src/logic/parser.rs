//! Extracts a [`LogicAnalysisResult`] from free-form model output.
//!
//! The only hard requirement is that both section headers are present.
//! Everything else degrades: a missing performance line leaves its field at
//! the default instead of discarding the extracted expression.

use super::markers;
use super::types::{LogicAnalysisResult, Performance};

/// Parses raw model text into an analysis result.
///
/// The expression is the text strictly between the first
/// `Logical Expression:` and the following `Performances:`, trimmed;
/// embedded newlines are kept. The performance block is everything after
/// `Performances:`, read line by line.
///
/// `original_sentence` is only used for tracing. If either header is absent
/// the canonical empty result is returned; this function never fails.
pub fn parse_response(raw_text: &str, original_sentence: &str) -> LogicAnalysisResult {
    let Some((_, rest)) = raw_text.split_once(markers::LOGICAL_EXPRESSION) else {
        tracing::debug!(
            sentence = %original_sentence,
            marker = markers::LOGICAL_EXPRESSION,
            "Model output is missing a section header"
        );
        return LogicAnalysisResult::empty();
    };
    let Some((expression_part, performance_part)) = rest.split_once(markers::PERFORMANCES) else {
        tracing::debug!(
            sentence = %original_sentence,
            marker = markers::PERFORMANCES,
            "Model output is missing a section header"
        );
        return LogicAnalysisResult::empty();
    };

    let performance = parse_performance(performance_part);
    LogicAnalysisResult::from_expression(expression_part.trim(), performance)
}

/// Every character that ends a line in model output, not just `\n`.
/// A `\r\n` pair yields an extra empty line, which matches nothing.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}', '\u{2029}',
];

fn parse_performance(block: &str) -> Performance {
    let mut performance = Performance::default();

    for line in block.split(LINE_BREAKS) {
        let line = line.trim();
        // The explanation prefixes extend the short ones, so test them first.
        if let Some(rest) = line.strip_prefix(markers::VALID_EXPLANATION) {
            performance.valid_explanation = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix(markers::VALID) {
            performance.valid = parse_flag(rest);
        } else if let Some(rest) = line.strip_prefix(markers::SOUND_EXPLANATION) {
            performance.sound_explanation = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix(markers::SOUND) {
            performance.sound = parse_flag(rest);
        }
    }

    performance
}

/// Only a case-insensitive `true` counts; anything else, empty included, is `false`.
fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Logical Expression:
Consumer spending falls ∨ unemployment rises → (~ economy improve ∧ interest rates rise)

Performances:
Valid: True
Valid Explanation:
Sound: False
Sound Explanation: correlation is not causation
";

    #[test]
    fn test_parses_sample_output() {
        let result = parse_response(SAMPLE, "x");

        assert_eq!(
            result.logical_expression,
            "Consumer spending falls ∨ unemployment rises → (~ economy improve ∧ interest rates rise)"
        );
        assert!(result.performance.valid);
        assert!(!result.performance.sound);
        assert_eq!(result.performance.valid_explanation, "");
        assert_eq!(
            result.performance.sound_explanation,
            "correlation is not causation"
        );
        assert_eq!(
            result.converted_tokens,
            vec![
                "consumer spending falls",
                "2",
                "unemployment rises",
                "4",
                "6",
                "3",
                "economy improve",
                "1",
                "interest rates rise",
                "6"
            ]
        );
    }

    #[test]
    fn test_missing_markers_yield_empty_result() {
        assert_eq!(
            parse_response("no markers here", "x"),
            LogicAnalysisResult::empty()
        );
        assert_eq!(parse_response("", "x"), LogicAnalysisResult::empty());
        assert_eq!(
            parse_response("Logical Expression: A → B\nValid: True", "x"),
            LogicAnalysisResult::empty()
        );
        assert_eq!(
            parse_response("Performances:\nValid: True", "x"),
            LogicAnalysisResult::empty()
        );
    }

    #[test]
    fn test_performances_before_expression_marker_is_ignored() {
        // Only a Performances: header after the expression header counts.
        let raw = "Performances: early\nLogical Expression: p ∧ q\nValid: true";
        assert!(parse_response(raw, "x").is_empty());
    }

    #[test]
    fn test_flag_parsing_is_case_insensitive() {
        for text in ["TRUE", "true", "True", "  tRuE  "] {
            let raw = format!("Logical Expression: p\nPerformances:\nValid: {text}\nSound: {text}");
            let result = parse_response(&raw, "x");
            assert!(result.performance.valid, "{text}");
            assert!(result.performance.sound, "{text}");
        }
        for text in ["False", "maybe", "", "true-ish", "yes"] {
            let raw = format!("Logical Expression: p\nPerformances:\nValid: {text}");
            assert!(!parse_response(&raw, "x").performance.valid, "{text}");
        }
    }

    #[test]
    fn test_missing_performance_lines_default() {
        let raw = "Logical Expression: p → q\nPerformances:\nValid: True\n";
        let result = parse_response(raw, "x");

        assert_eq!(result.logical_expression, "p → q");
        assert!(result.performance.valid);
        assert!(!result.performance.sound);
        assert!(result.performance.valid_explanation.is_empty());
        assert!(result.performance.sound_explanation.is_empty());
    }

    #[test]
    fn test_explanation_prefix_does_not_set_flag() {
        let raw = "Logical Expression: p\nPerformances:\nValid Explanation: true\nSound Explanation: True";
        let result = parse_response(raw, "x");

        assert!(!result.performance.valid);
        assert!(!result.performance.sound);
        assert_eq!(result.performance.valid_explanation, "true");
        assert_eq!(result.performance.sound_explanation, "True");
    }

    #[test]
    fn test_indented_lines_and_extra_sections() {
        let raw = "Here is my analysis.\n\nLogical Expression:\n   p ∨ q   \n\nPerformances:\n   Valid: false\n   Sound:   TRUE  \nNotes: something unrelated\n";
        let result = parse_response(raw, "x");

        assert_eq!(result.logical_expression, "p ∨ q");
        assert_eq!(result.converted_tokens, vec!["p", "2", "q"]);
        assert!(!result.performance.valid);
        assert!(result.performance.sound);
    }

    #[test]
    fn test_multiline_expression_is_preserved() {
        let raw = "Logical Expression:\nA → B\nB → C\nPerformances:\nValid: True";
        let result = parse_response(raw, "x");

        assert_eq!(result.logical_expression, "A → B\nB → C");
        assert_eq!(result.converted_tokens, vec!["a", "4", "b\nb", "4", "c"]);
    }

    #[test]
    fn test_later_lines_override_earlier_ones() {
        let raw = "Logical Expression: p\nPerformances:\nValid: True\nValid: False";
        assert!(!parse_response(raw, "x").performance.valid);
    }

    #[test]
    fn test_empty_expression_between_markers() {
        let raw = "Logical Expression:\n\nPerformances:\nValid: True";
        let result = parse_response(raw, "x");

        assert!(result.is_empty());
        assert!(result.converted_tokens.is_empty());
        assert!(result.performance.valid);
    }

    #[test]
    fn test_performance_lines_split_on_any_line_break() {
        let raw = "Logical Expression:\rp → q\rPerformances:\rValid: True\rSound: False\rSound Explanation: nope";
        let result = parse_response(raw, "x");
        assert_eq!(result.logical_expression, "p → q");
        assert!(result.performance.valid);
        assert!(!result.performance.sound);
        assert_eq!(result.performance.sound_explanation, "nope");

        let raw = "Logical Expression: p\nPerformances:\u{2028}Valid: true\u{2029}Sound: TRUE\r\nValid Explanation: fine";
        let result = parse_response(raw, "x");
        assert!(result.performance.valid);
        assert!(result.performance.sound);
        assert_eq!(result.performance.valid_explanation, "fine");
    }
}
