//! Conversation state for debate training sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::topics::{DebateTopic, Side};
use crate::agents::Exchange;
use crate::logic::LogicAnalysisResult;

/// One speaker's contribution to a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub text: String,
    pub logic_chain: LogicAnalysisResult,
}

impl Turn {
    pub fn new(text: impl Into<String>, logic_chain: LogicAnalysisResult) -> Self {
        Self {
            text: text.into(),
            logic_chain,
        }
    }
}

/// A user argument, the opponent's reply, and both analyses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateRound {
    pub round_index: usize,
    pub round_id: Uuid,
    pub user: Turn,
    pub ai: Turn,
    pub timestamp: DateTime<Utc>,
}

/// Logic-chain view of a round, as returned by the history endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogicChainEntry {
    pub round_index: usize,
    pub user_chain: Turn,
    pub ai_chain: Turn,
    pub timestamp: DateTime<Utc>,
}

impl From<&DebateRound> for LogicChainEntry {
    fn from(round: &DebateRound) -> Self {
        Self {
            round_index: round.round_index,
            user_chain: round.user.clone(),
            ai_chain: round.ai.clone(),
            timestamp: round.timestamp,
        }
    }
}

/// A training conversation: topic, side, rounds and the analysis context.
///
/// `context_expressions` is append-only and ordered by production; it is
/// what later prompts receive as previous logical expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    pub topic_id: u32,
    pub user_side: Side,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub rounds: Vec<DebateRound>,
    #[serde(default)]
    pub context_expressions: Vec<String>,
}

impl Conversation {
    pub fn new(topic_id: u32, user_side: Side) -> Self {
        Self {
            id: Uuid::new_v4(),
            topic_id,
            user_side,
            started_at: Utc::now(),
            rounds: Vec::new(),
            context_expressions: Vec::new(),
        }
    }

    pub fn topic(&self) -> Option<&'static DebateTopic> {
        DebateTopic::find(self.topic_id)
    }

    /// Earlier rounds as user/opponent exchanges, oldest first.
    pub fn exchanges(&self) -> Vec<Exchange> {
        self.rounds
            .iter()
            .map(|round| Exchange {
                user: round.user.text.clone(),
                opponent: round.ai.text.clone(),
            })
            .collect()
    }

    /// Appends a round and extends the context with its non-empty expressions,
    /// user first.
    pub fn record_round(&mut self, user: Turn, ai: Turn) -> &DebateRound {
        for turn in [&user, &ai] {
            if !turn.logic_chain.is_empty() {
                self.context_expressions
                    .push(turn.logic_chain.logical_expression.clone());
            }
        }

        let round = DebateRound {
            round_index: self.rounds.len(),
            round_id: Uuid::new_v4(),
            user,
            ai,
            timestamp: Utc::now(),
        };
        self.rounds.push(round);
        &self.rounds[self.rounds.len() - 1]
    }

    pub fn current_round(&self) -> Option<&DebateRound> {
        self.rounds.last()
    }

    pub fn logic_chains(&self) -> Vec<LogicChainEntry> {
        self.rounds.iter().map(LogicChainEntry::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::Performance;

    fn analysis(expr: &str) -> LogicAnalysisResult {
        LogicAnalysisResult::from_expression(expr, Performance::default())
    }

    #[test]
    fn test_record_round_extends_context_in_order() {
        let mut conversation = Conversation::new(1, Side::Supporting);

        conversation.record_round(Turn::new("u1", analysis("a → b")), Turn::new("o1", analysis("~ b")));
        let second = conversation
            .record_round(
                Turn::new("u2", LogicAnalysisResult::empty()),
                Turn::new("o2", analysis("c ∨ d")),
            )
            .clone();

        assert_eq!(second.round_index, 1);
        assert_eq!(conversation.context_expressions, vec!["a → b", "~ b", "c ∨ d"]);
        assert_eq!(conversation.current_round(), Some(&second));
    }

    #[test]
    fn test_exchanges_and_chains() {
        let mut conversation = Conversation::new(2, Side::Opposing);
        conversation.record_round(Turn::new("u1", analysis("p")), Turn::new("o1", analysis("q")));

        assert_eq!(
            conversation.exchanges(),
            vec![Exchange {
                user: "u1".to_string(),
                opponent: "o1".to_string()
            }]
        );
        let chains = conversation.logic_chains();
        assert_eq!(chains.len(), 1);
        assert_eq!(chains[0].user_chain.logic_chain.logical_expression, "p");
        assert_eq!(chains[0].ai_chain.text, "o1");
    }

    #[test]
    fn test_conversation_round_trips_through_json() {
        let mut conversation = Conversation::new(4, Side::Supporting);
        conversation.record_round(Turn::new("u", analysis("x ↔ y")), Turn::new("o", analysis("z")));

        let json = serde_json::to_string(&conversation).expect("serializes");
        let restored: Conversation = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(restored, conversation);
        assert_eq!(restored.topic().map(|t| t.id), Some(4));
    }
}
