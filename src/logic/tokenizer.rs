//! Compiles a logical expression into the numeric-coded token stream.
//!
//! Operators map to fixed single-digit codes; everything between operators is
//! an operand, trimmed and lowercased. Both parentheses share one code, so
//! bracket direction and nesting depth cannot be recovered from the tokens.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Single alternation over every operator symbol, full-width NOT included.
const OPERATOR_PATTERN: &str = r"∧|∨|~|～|→|↔|\(|\)";

static OPERATOR_REGEX: OnceLock<Regex> = OnceLock::new();

fn operator_regex() -> &'static Regex {
    OPERATOR_REGEX.get_or_init(|| Regex::new(OPERATOR_PATTERN).expect("operator pattern is valid"))
}

/// Logical connectives understood by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicOperator {
    /// `∧`
    And,
    /// `∨`
    Or,
    /// `~` or the full-width `～`
    Not,
    /// `→`
    Implies,
    /// `↔`
    Iff,
    /// `(` or `)`
    Paren,
}

impl LogicOperator {
    /// Returns all operators in token-code order.
    pub fn all() -> [Self; 6] {
        [
            Self::And,
            Self::Or,
            Self::Not,
            Self::Implies,
            Self::Iff,
            Self::Paren,
        ]
    }

    /// Source symbols that lex to this operator.
    pub fn symbols(&self) -> &'static [&'static str] {
        match self {
            Self::And => &["∧"],
            Self::Or => &["∨"],
            Self::Not => &["~", "～"],
            Self::Implies => &["→"],
            Self::Iff => &["↔"],
            Self::Paren => &["(", ")"],
        }
    }

    /// The compact token emitted for this operator.
    pub fn token(&self) -> &'static str {
        match self {
            Self::And => "1",
            Self::Or => "2",
            Self::Not => "3",
            Self::Implies => "4",
            Self::Iff => "5",
            Self::Paren => "6",
        }
    }

    /// Looks up the operator for an exact symbol match.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|op| op.symbols().contains(&symbol))
    }
}

impl fmt::Display for LogicOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbols()[0])
    }
}

/// One element of a lexed expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogicToken {
    Operator(LogicOperator),
    /// Free text between operators, already trimmed and lowercased.
    Operand(String),
}

impl LogicToken {
    /// The wire form of this token.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Operator(op) => op.token(),
            Self::Operand(text) => text,
        }
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_))
    }
}

impl From<LogicToken> for String {
    fn from(token: LogicToken) -> Self {
        match token {
            LogicToken::Operator(op) => op.token().to_string(),
            LogicToken::Operand(text) => text,
        }
    }
}

/// Splits an expression into operator and operand tokens, left to right.
///
/// Pieces that are empty after trimming are dropped, so adjacent operators
/// produce adjacent operator tokens with nothing in between.
pub fn lex(expression: &str) -> Vec<LogicToken> {
    let mut tokens = Vec::new();
    let mut cursor = 0;

    for found in operator_regex().find_iter(expression) {
        push_operand(&mut tokens, &expression[cursor..found.start()]);
        if let Some(op) = LogicOperator::from_symbol(found.as_str()) {
            tokens.push(LogicToken::Operator(op));
        }
        cursor = found.end();
    }
    push_operand(&mut tokens, &expression[cursor..]);

    tokens
}

fn push_operand(tokens: &mut Vec<LogicToken>, piece: &str) {
    let trimmed = piece.trim();
    if !trimmed.is_empty() {
        tokens.push(LogicToken::Operand(trimmed.to_lowercase()));
    }
}

/// Converts an expression into its token sequence.
///
/// Total over all inputs and deterministic: the same string always yields
/// the same sequence.
///
/// ```
/// use debate_forge::logic::tokenize;
///
/// assert_eq!(tokenize("~ A ∧ (B ∨ C)"), vec!["3", "a", "1", "6", "b", "2", "c", "6"]);
/// assert!(tokenize("").is_empty());
/// ```
pub fn tokenize(expression: &str) -> Vec<String> {
    lex(expression).into_iter().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_operator_maps_to_its_code() {
        let cases = [
            ("∧", "1"),
            ("∨", "2"),
            ("~", "3"),
            ("～", "3"),
            ("→", "4"),
            ("↔", "5"),
            ("(", "6"),
            (")", "6"),
        ];
        for (symbol, code) in cases {
            assert_eq!(tokenize(symbol), vec![code], "symbol {symbol}");
        }
    }

    #[test]
    fn test_full_width_not_matches_ascii_not() {
        assert_eq!(tokenize("～ p"), tokenize("~ p"));
    }

    #[test]
    fn test_operand_is_lowercased_and_trimmed_but_not_split() {
        assert_eq!(tokenize("  Economy Improve  "), vec!["economy improve"]);
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t").is_empty());
    }

    #[test]
    fn test_consecutive_operators_have_no_operand_between() {
        assert_eq!(tokenize("~~p"), vec!["3", "3", "p"]);
        assert_eq!(tokenize("((a))"), vec!["6", "6", "a", "6", "6"]);
    }

    #[test]
    fn test_operators_without_spacing() {
        assert_eq!(tokenize("A∧B→C"), vec!["a", "1", "b", "4", "c"]);
    }

    #[test]
    fn test_unknown_symbols_stay_in_operands() {
        // Only the fixed grammar is recognised; other logic glyphs are text.
        assert_eq!(tokenize("¬p ∧ q"), vec!["¬p", "1", "q"]);
    }

    #[test]
    fn test_multiline_operand_keeps_inner_newline() {
        assert_eq!(tokenize("A\nB → C"), vec!["a\nb", "4", "c"]);
    }

    #[test]
    fn test_lex_reports_operator_kinds() {
        let tokens = lex("p ↔ (q)");
        assert_eq!(
            tokens,
            vec![
                LogicToken::Operand("p".to_string()),
                LogicToken::Operator(LogicOperator::Iff),
                LogicToken::Operator(LogicOperator::Paren),
                LogicToken::Operand("q".to_string()),
                LogicToken::Operator(LogicOperator::Paren),
            ]
        );
        assert!(tokens[1].is_operator());
        assert_eq!(tokens[3].as_str(), "q");
    }

    #[test]
    fn test_from_symbol_rejects_non_operators() {
        assert_eq!(LogicOperator::from_symbol("¬"), None);
        assert_eq!(LogicOperator::from_symbol("∧∧"), None);
        assert_eq!(LogicOperator::from_symbol(")"), Some(LogicOperator::Paren));
    }

    #[test]
    fn test_tokenize_is_deterministic() {
        let expr = "Consumer spending falls ∨ unemployment rises → (~ economy improve ∧ interest rates rise)";
        let first = tokenize(expr);
        for _ in 0..5 {
            assert_eq!(tokenize(expr), first);
        }
    }
}
