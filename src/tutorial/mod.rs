//! Token-structure quiz.
//!
//! Each question shows an example token sequence and a question sequence; the
//! learner answers whether the two express the same logical structure.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TutorialError;
use crate::logic::tokenize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorialQuestion {
    pub id: u32,
    pub example: Vec<String>,
    pub question: Vec<String>,
    pub answer: bool,
    pub explanation: String,
}

impl TutorialQuestion {
    /// Builds a question from two logical expressions. The expected answer is
    /// whether both tokenize to the same sequence.
    pub fn from_expressions(
        id: u32,
        example_expression: &str,
        question_expression: &str,
        explanation: impl Into<String>,
    ) -> Self {
        let example = tokenize(example_expression);
        let question = tokenize(question_expression);
        Self {
            id,
            answer: example == question,
            example,
            question,
            explanation: explanation.into(),
        }
    }

    /// The part shown to the learner before answering.
    pub fn prompt(&self) -> QuestionPrompt<'_> {
        QuestionPrompt {
            id: self.id,
            example: &self.example,
            question: &self.question,
        }
    }
}

/// A question without its answer.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionPrompt<'a> {
    pub id: u32,
    pub example: &'a [String],
    pub question: &'a [String],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TutorialAnswer {
    pub correct: bool,
    /// Present only when the answer was wrong.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QuestionFile {
    questions: Vec<TutorialQuestion>,
}

/// Ordered collection of tutorial questions with unique ids.
#[derive(Debug, Clone)]
pub struct TutorialBank {
    questions: Vec<TutorialQuestion>,
    index: HashMap<u32, usize>,
}

impl Default for TutorialBank {
    fn default() -> Self {
        let builtin = TutorialQuestion {
            id: 1,
            example: vec!["emily happy".into(), "4".into(), "have desert".into()],
            question: vec!["emily has desert".into(), "4".into(), "emily happy".into()],
            answer: false,
            explanation: "The example and question have different logical structures: \
                          'emily happy' vs 'emily has desert'."
                .to_string(),
        };
        Self {
            index: HashMap::from([(builtin.id, 0)]),
            questions: vec![builtin],
        }
    }
}

impl TutorialBank {
    pub fn new(questions: Vec<TutorialQuestion>) -> Result<Self, TutorialError> {
        let mut index = HashMap::with_capacity(questions.len());
        for (position, question) in questions.iter().enumerate() {
            if index.insert(question.id, position).is_some() {
                return Err(TutorialError::DuplicateQuestion(question.id));
            }
        }
        Ok(Self { questions, index })
    }

    /// Parses a document of the form `questions: [ {id, example, question, answer, explanation}, ... ]`.
    pub fn from_yaml_str(content: &str) -> Result<Self, TutorialError> {
        let file: QuestionFile = serde_yaml::from_str(content)?;
        Self::new(file.questions)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, TutorialError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[TutorialQuestion] {
        &self.questions
    }

    pub fn question(&self, id: u32) -> Option<&TutorialQuestion> {
        self.index.get(&id).map(|&position| &self.questions[position])
    }

    /// Question following `after` in bank order, or the first one when
    /// `after` is `None` or the last question.
    pub fn next_question(&self, after: Option<u32>) -> Option<&TutorialQuestion> {
        let start = after
            .and_then(|id| self.index.get(&id))
            .map(|&position| (position + 1) % self.questions.len())
            .unwrap_or(0);
        self.questions.get(start)
    }

    pub fn check_answer(&self, question_id: u32, user_answer: bool) -> Result<TutorialAnswer, TutorialError> {
        let question = self
            .question(question_id)
            .ok_or(TutorialError::UnknownQuestion(question_id))?;

        let correct = user_answer == question.answer;
        tracing::debug!(question_id, correct, "Tutorial answer checked");

        Ok(TutorialAnswer {
            correct,
            explanation: (!correct).then(|| question.explanation.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_question() {
        let bank = TutorialBank::default();
        let question = bank.next_question(None).unwrap();
        assert_eq!(question.id, 1);
        assert_eq!(question.example, vec!["emily happy", "4", "have desert"]);
        assert!(!question.answer);
    }

    #[test]
    fn test_check_answer_explains_only_wrong_answers() {
        let bank = TutorialBank::default();

        let right = bank.check_answer(1, false).unwrap();
        assert!(right.correct);
        assert!(right.explanation.is_none());
        assert_eq!(serde_json::to_value(&right).unwrap(), serde_json::json!({"correct": true}));

        let wrong = bank.check_answer(1, true).unwrap();
        assert!(!wrong.correct);
        assert!(wrong.explanation.unwrap().contains("emily has desert"));
    }

    #[test]
    fn test_unknown_question() {
        let bank = TutorialBank::default();
        assert!(matches!(
            bank.check_answer(999, true),
            Err(TutorialError::UnknownQuestion(999))
        ));
    }

    #[test]
    fn test_from_expressions_compares_tokens() {
        let same = TutorialQuestion::from_expressions(7, "A ∧ B", "a∧b", "same");
        assert!(same.answer);
        assert_eq!(same.example, vec!["a", "1", "b"]);

        let different = TutorialQuestion::from_expressions(8, "A → B", "B → A", "reversed");
        assert!(!different.answer);
    }

    #[test]
    fn test_yaml_loading_and_order() {
        let yaml = r#"
questions:
  - id: 10
    example: ["p", "4", "q"]
    question: ["p", "4", "q"]
    answer: true
    explanation: "Identical structure."
  - id: 20
    example: ["p", "1", "q"]
    question: ["p", "2", "q"]
    answer: false
    explanation: "And is not or."
"#;
        let bank = TutorialBank::from_yaml_str(yaml).unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.next_question(Some(10)).unwrap().id, 20);
        assert_eq!(bank.next_question(Some(20)).unwrap().id, 10);
        assert_eq!(bank.question(20).unwrap().explanation, "And is not or.");
    }

    #[test]
    fn test_yaml_duplicate_ids_rejected() {
        let yaml = r#"
questions:
  - { id: 1, example: [], question: [], answer: true, explanation: "" }
  - { id: 1, example: [], question: [], answer: true, explanation: "" }
"#;
        assert!(matches!(
            TutorialBank::from_yaml_str(yaml),
            Err(TutorialError::DuplicateQuestion(1))
        ));
    }

    #[test]
    fn test_prompt_hides_answer() {
        let bank = TutorialBank::default();
        let prompt = serde_json::to_value(bank.question(1).unwrap().prompt()).unwrap();
        assert!(prompt.get("answer").is_none());
        assert_eq!(prompt["question"][0], "emily has desert");
    }
}
