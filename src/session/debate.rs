//! Human-vs-human debates.
//!
//! Two registered speakers argue a free-text topic. Each submitted argument
//! is analyzed on its own and tagged with the speaker's side; the debate's
//! earlier expressions are passed along as analysis context.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::locks::KeyedLocks;
use super::store::SessionStore;
use super::topics::Side;
use crate::agents::LogicAnalyst;
use crate::error::{SessionError, SessionResult};
use crate::logic::LogicAnalysisResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub speaker_id: String,
    pub side: Side,
    pub joined_at: DateTime<Utc>,
}

/// One analyzed argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    pub round_index: usize,
    pub round_id: Uuid,
    pub speaker_id: String,
    pub side: Side,
    pub text: String,
    pub logic_chain: LogicAnalysisResult,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debate {
    pub id: Uuid,
    pub topic: String,
    pub started_at: DateTime<Utc>,
    /// Supporting speaker first, then opposing.
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub rounds: Vec<Argument>,
}

impl Debate {
    pub fn new(
        topic: impl Into<String>,
        supporting_id: impl Into<String>,
        opposing_id: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            topic: topic.into(),
            started_at: now,
            participants: vec![
                Participant {
                    speaker_id: supporting_id.into(),
                    side: Side::Supporting,
                    joined_at: now,
                },
                Participant {
                    speaker_id: opposing_id.into(),
                    side: Side::Opposing,
                    joined_at: now,
                },
            ],
            rounds: Vec::new(),
        }
    }

    pub fn side_of(&self, speaker_id: &str) -> Option<Side> {
        self.participants
            .iter()
            .find(|p| p.speaker_id == speaker_id)
            .map(|p| p.side)
    }

    /// Non-empty expressions of earlier arguments, in submission order.
    pub fn context_expressions(&self) -> Vec<String> {
        self.rounds
            .iter()
            .filter(|round| !round.logic_chain.is_empty())
            .map(|round| round.logic_chain.logical_expression.clone())
            .collect()
    }
}

/// Runs debates between two human speakers.
pub struct DebateService {
    store: Arc<dyn SessionStore>,
    analyst: LogicAnalyst,
    locks: KeyedLocks,
}

impl std::fmt::Debug for DebateService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebateService")
            .field("analyst", &self.analyst)
            .finish_non_exhaustive()
    }
}

impl DebateService {
    pub fn new(store: Arc<dyn SessionStore>, analyst: LogicAnalyst) -> Self {
        Self {
            store,
            analyst,
            locks: KeyedLocks::default(),
        }
    }

    /// Starts a debate; the two speaker ids must be non-empty and distinct.
    pub async fn start(&self, topic: &str, supporting_id: &str, opposing_id: &str) -> SessionResult<Debate> {
        let (supporting_id, opposing_id) = (supporting_id.trim(), opposing_id.trim());
        if supporting_id.is_empty() || opposing_id.is_empty() {
            return Err(SessionError::InvalidParticipants(
                "speaker ids cannot be empty".to_string(),
            ));
        }
        if supporting_id == opposing_id {
            return Err(SessionError::InvalidParticipants(format!(
                "'{supporting_id}' cannot take both sides"
            )));
        }

        let debate = Debate::new(topic.trim(), supporting_id, opposing_id);
        self.store.save_debate(&debate).await?;

        tracing::info!(debate_id = %debate.id, topic = %debate.topic, "Debate started");
        Ok(debate)
    }

    /// Analyzes `text` from `speaker_id` and appends it to the debate.
    ///
    /// Checks run in order: the debate exists, the speaker takes part, the
    /// text is non-empty.
    pub async fn submit(&self, debate_id: Uuid, speaker_id: &str, text: &str) -> SessionResult<Argument> {
        let _guard = self.locks.lock(debate_id).await;

        let mut debate = self
            .store
            .load_debate(debate_id)
            .await?
            .ok_or(SessionError::DebateNotFound(debate_id))?;
        let side = debate
            .side_of(speaker_id)
            .ok_or_else(|| SessionError::NotParticipant {
                debate_id,
                speaker_id: speaker_id.to_string(),
            })?;
        let text = text.trim();
        if text.is_empty() {
            return Err(SessionError::EmptyUtterance);
        }

        let logic_chain = self
            .analyst
            .analyze(text, &debate.context_expressions())
            .await?;

        let argument = Argument {
            round_index: debate.rounds.len(),
            round_id: Uuid::new_v4(),
            speaker_id: speaker_id.to_string(),
            side,
            text: text.to_string(),
            logic_chain,
            timestamp: Utc::now(),
        };
        debate.rounds.push(argument.clone());
        self.store.save_debate(&debate).await?;

        tracing::info!(
            debate_id = %debate_id,
            round = argument.round_index,
            side = %side,
            "Argument recorded"
        );
        Ok(argument)
    }

    pub async fn history(&self, debate_id: Uuid) -> SessionResult<Debate> {
        self.store
            .load_debate(debate_id)
            .await?
            .ok_or(SessionError::DebateNotFound(debate_id))
    }
}
