//! Read access to stored training conversations.

use std::sync::Arc;

use uuid::Uuid;

use super::store::SessionStore;
use super::types::{Conversation, LogicChainEntry};
use crate::error::{SessionError, SessionResult};

/// Looks up conversations and their logic chains without needing a model.
#[derive(Clone)]
pub struct SessionHistory {
    store: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for SessionHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHistory").finish_non_exhaustive()
    }
}

impl SessionHistory {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn conversation(&self, conversation_id: Uuid) -> SessionResult<Conversation> {
        self.store
            .load(conversation_id)
            .await?
            .ok_or(SessionError::ConversationNotFound(conversation_id))
    }

    pub async fn logic_chains(&self, conversation_id: Uuid) -> SessionResult<Vec<LogicChainEntry>> {
        Ok(self.conversation(conversation_id).await?.logic_chains())
    }

    /// Logic chain of the most recent round.
    pub async fn current_chain(&self, conversation_id: Uuid) -> SessionResult<LogicChainEntry> {
        self.conversation(conversation_id)
            .await?
            .current_round()
            .map(LogicChainEntry::from)
            .ok_or(SessionError::NoRounds(conversation_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{LogicAnalysisResult, Performance};
    use crate::session::{InMemorySessionStore, Side, Turn};

    fn chain(expression: &str) -> LogicAnalysisResult {
        LogicAnalysisResult::from_expression(expression, Performance::default())
    }

    #[tokio::test]
    async fn test_reads_stored_rounds() {
        let store = Arc::new(InMemorySessionStore::new());
        let mut conversation = Conversation::new(2, Side::Supporting);
        conversation.record_round(Turn::new("a", chain("a → b")), Turn::new("x", chain("x")));
        conversation.record_round(Turn::new("c", chain("c ∧ d")), Turn::new("y", chain("y")));
        store.save(&conversation).await.unwrap();

        let history = SessionHistory::new(store);
        assert_eq!(history.conversation(conversation.id).await.unwrap(), conversation);

        let chains = history.logic_chains(conversation.id).await.unwrap();
        assert_eq!(chains.len(), 2);

        let current = history.current_chain(conversation.id).await.unwrap();
        assert_eq!(current, chains[1]);
        assert_eq!(current.user_chain.logic_chain.logical_expression, "c ∧ d");
    }

    #[tokio::test]
    async fn test_missing_conversation_and_empty_rounds() {
        let store = Arc::new(InMemorySessionStore::new());
        let conversation = Conversation::new(1, Side::Opposing);
        store.save(&conversation).await.unwrap();
        let history = SessionHistory::new(store);

        assert!(matches!(
            history.current_chain(conversation.id).await,
            Err(SessionError::NoRounds(id)) if id == conversation.id
        ));
        assert!(history.logic_chains(conversation.id).await.unwrap().is_empty());

        let missing = Uuid::new_v4();
        assert!(matches!(
            history.conversation(missing).await,
            Err(SessionError::ConversationNotFound(id)) if id == missing
        ));
    }
}
