//! Debate training orchestration: opponent replies plus logic analysis of
//! both sides of every round.

use std::sync::Arc;

use uuid::Uuid;

use super::history::SessionHistory;
use super::locks::KeyedLocks;
use super::store::SessionStore;
use super::topics::{DebateTopic, Side};
use super::types::{Conversation, DebateRound, LogicChainEntry, Turn};
use crate::agents::{LogicAnalyst, OpponentAgent};
use crate::error::{SessionError, SessionResult};

/// Runs training conversations against an AI opponent.
///
/// Rounds within one conversation are serialized; different conversations
/// proceed independently.
pub struct DebateTrainer {
    store: Arc<dyn SessionStore>,
    analyst: LogicAnalyst,
    opponent: OpponentAgent,
    history: SessionHistory,
    locks: KeyedLocks,
}

impl std::fmt::Debug for DebateTrainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebateTrainer")
            .field("analyst", &self.analyst)
            .finish_non_exhaustive()
    }
}

impl DebateTrainer {
    pub fn new(store: Arc<dyn SessionStore>, analyst: LogicAnalyst, opponent: OpponentAgent) -> Self {
        Self {
            history: SessionHistory::new(store.clone()),
            store,
            analyst,
            opponent,
            locks: KeyedLocks::default(),
        }
    }

    /// Starts a conversation on `topic_id` with the user arguing `user_side`.
    pub async fn start(&self, topic_id: u32, user_side: Side) -> SessionResult<Conversation> {
        if DebateTopic::find(topic_id).is_none() {
            return Err(SessionError::InvalidTopic(topic_id));
        }

        let conversation = Conversation::new(topic_id, user_side);
        self.store.save(&conversation).await?;

        tracing::info!(
            conversation_id = %conversation.id,
            topic_id,
            side = %user_side,
            "Training conversation started"
        );
        Ok(conversation)
    }

    /// Plays one round: the opponent replies to `utterance`, then both
    /// utterances are analyzed against the context accumulated so far.
    pub async fn play_round(&self, conversation_id: Uuid, utterance: &str) -> SessionResult<DebateRound> {
        let utterance = utterance.trim();
        if utterance.is_empty() {
            return Err(SessionError::EmptyUtterance);
        }

        let _guard = self.locks.lock(conversation_id).await;

        let mut conversation = self
            .store
            .load(conversation_id)
            .await?
            .ok_or(SessionError::ConversationNotFound(conversation_id))?;
        let topic = conversation
            .topic()
            .ok_or(SessionError::InvalidTopic(conversation.topic_id))?;

        let reply = self
            .opponent
            .respond(topic, conversation.user_side, utterance, &conversation.exchanges())
            .await?;

        let prior = conversation.context_expressions.clone();
        let (user_chain, ai_chain) = futures::try_join!(
            self.analyst.analyze(utterance, &prior),
            self.analyst.analyze(&reply, &prior),
        )?;

        let round = conversation
            .record_round(Turn::new(utterance, user_chain), Turn::new(reply, ai_chain))
            .clone();
        self.store.save(&conversation).await?;

        tracing::info!(
            conversation_id = %conversation_id,
            round = round.round_index,
            context_len = conversation.context_expressions.len(),
            "Round recorded"
        );
        Ok(round)
    }

    pub async fn history(&self, conversation_id: Uuid) -> SessionResult<Conversation> {
        self.history.conversation(conversation_id).await
    }

    pub async fn logic_chains(&self, conversation_id: Uuid) -> SessionResult<Vec<LogicChainEntry>> {
        self.history.logic_chains(conversation_id).await
    }

    /// Logic chain of the most recent round.
    pub async fn current_chain(&self, conversation_id: Uuid) -> SessionResult<LogicChainEntry> {
        self.history.current_chain(conversation_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LlmError;
    use crate::llm::{Choice, GenerationRequest, GenerationResponse, LlmProvider, Message, Usage};
    use crate::session::InMemorySessionStore;
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;

    const ANALYSIS_MARKER: &str = "Now, analyze this sentence:";

    /// Replies with a fixed opponent line, or with a canned analysis whose
    /// expression is derived from the analyzed sentence.
    struct ScriptedProvider {
        prompts: StdMutex<Vec<String>>,
    }

    impl ScriptedProvider {
        fn new() -> Self {
            Self {
                prompts: StdMutex::new(Vec::new()),
            }
        }

        fn analysis_prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, LlmError> {
            let last = request
                .messages
                .last()
                .map(|m| m.content.clone())
                .unwrap_or_default();

            let content = match last.split_once(ANALYSIS_MARKER) {
                Some((_, sentence)) => {
                    self.prompts.lock().unwrap().push(last.clone());
                    let word = sentence
                        .trim()
                        .trim_matches('"')
                        .split_whitespace()
                        .next()
                        .unwrap_or("x")
                        .to_lowercase();
                    format!(
                        "Logical Expression:\n{word} → Q\nPerformances:\nValid: true\nSound: false\n"
                    )
                }
                None => "Rules protect everyone".to_string(),
            };

            Ok(GenerationResponse {
                id: "test".to_string(),
                model: request.model,
                choices: vec![Choice {
                    index: 0,
                    message: Message::assistant(content),
                    finish_reason: "stop".to_string(),
                }],
                usage: Usage::default(),
            })
        }
    }

    fn trainer(provider: Arc<ScriptedProvider>) -> DebateTrainer {
        DebateTrainer::new(
            Arc::new(InMemorySessionStore::new()),
            LogicAnalyst::with_defaults(provider.clone()),
            OpponentAgent::with_defaults(provider),
        )
    }

    #[tokio::test]
    async fn test_start_rejects_unknown_topic() {
        let trainer = trainer(Arc::new(ScriptedProvider::new()));
        let err = trainer.start(99, Side::Supporting).await.unwrap_err();
        assert!(matches!(err, SessionError::InvalidTopic(99)));
    }

    #[tokio::test]
    async fn test_play_round_records_both_analyses() {
        let trainer = trainer(Arc::new(ScriptedProvider::new()));
        let conversation = trainer.start(1, Side::Supporting).await.unwrap();

        let round = trainer
            .play_round(conversation.id, "  Freedom matters  ")
            .await
            .unwrap();

        assert_eq!(round.round_index, 0);
        assert_eq!(round.user.text, "Freedom matters");
        assert_eq!(round.user.logic_chain.logical_expression, "freedom → Q");
        assert_eq!(round.user.logic_chain.converted_tokens, vec!["freedom", "4", "q"]);
        assert_eq!(round.ai.text, "Rules protect everyone");
        assert_eq!(round.ai.logic_chain.logical_expression, "rules → Q");
        assert!(round.user.logic_chain.performance.valid);

        let current = trainer.current_chain(conversation.id).await.unwrap();
        assert_eq!(current.round_index, 0);
    }

    #[tokio::test]
    async fn test_context_accumulates_across_rounds() {
        let provider = Arc::new(ScriptedProvider::new());
        let trainer = trainer(provider.clone());
        let conversation = trainer.start(2, Side::Opposing).await.unwrap();

        trainer.play_round(conversation.id, "Uniforms stifle").await.unwrap();
        trainer.play_round(conversation.id, "Students suffer").await.unwrap();

        let history = trainer.history(conversation.id).await.unwrap();
        assert_eq!(history.rounds.len(), 2);
        assert_eq!(
            history.context_expressions,
            vec!["uniforms → Q", "rules → Q", "students → Q", "rules → Q"]
        );

        let prompts = provider.analysis_prompts();
        assert_eq!(prompts.len(), 4);
        assert!(prompts[..2].iter().all(|p| !p.contains("Previous Logical Expressions:")));
        assert!(prompts[2..]
            .iter()
            .all(|p| p.contains("Previous Logical Expressions:\nuniforms → Q\nrules → Q\n")));

        assert_eq!(trainer.logic_chains(conversation.id).await.unwrap().len(), 2);
        assert_eq!(trainer.locks.len(), 0);
    }

    #[tokio::test]
    async fn test_play_round_errors() {
        let trainer = trainer(Arc::new(ScriptedProvider::new()));
        let conversation = trainer.start(3, Side::Supporting).await.unwrap();

        assert!(matches!(
            trainer.play_round(conversation.id, "   ").await,
            Err(SessionError::EmptyUtterance)
        ));
        assert!(matches!(
            trainer.current_chain(conversation.id).await,
            Err(SessionError::NoRounds(_))
        ));

        let missing = Uuid::new_v4();
        assert!(matches!(
            trainer.play_round(missing, "hello").await,
            Err(SessionError::ConversationNotFound(id)) if id == missing
        ));
    }
}
