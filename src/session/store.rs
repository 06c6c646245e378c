//! Conversation and debate persistence.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::debate::Debate;
use super::types::Conversation;
use crate::error::SessionResult;

/// Storage backend for training conversations.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, id: Uuid) -> SessionResult<Option<Conversation>>;

    /// Inserts or replaces the conversation with the same id.
    async fn save(&self, conversation: &Conversation) -> SessionResult<()>;

    /// Returns true if a conversation was removed.
    async fn remove(&self, id: Uuid) -> SessionResult<bool>;

    /// Ids of stored conversations, oldest first.
    async fn list(&self) -> SessionResult<Vec<Uuid>>;

    async fn load_debate(&self, id: Uuid) -> SessionResult<Option<Debate>>;

    /// Inserts or replaces the debate with the same id.
    async fn save_debate(&self, debate: &Debate) -> SessionResult<()>;
}

/// Process-local store; contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    conversations: RwLock<HashMap<Uuid, Conversation>>,
    debates: RwLock<HashMap<Uuid, Debate>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, id: Uuid) -> SessionResult<Option<Conversation>> {
        Ok(self.conversations.read().await.get(&id).cloned())
    }

    async fn save(&self, conversation: &Conversation) -> SessionResult<()> {
        self.conversations
            .write()
            .await
            .insert(conversation.id, conversation.clone());
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> SessionResult<bool> {
        Ok(self.conversations.write().await.remove(&id).is_some())
    }

    async fn list(&self) -> SessionResult<Vec<Uuid>> {
        let guard = self.conversations.read().await;
        let mut entries: Vec<_> = guard.values().map(|c| (c.started_at, c.id)).collect();
        entries.sort();
        Ok(entries.into_iter().map(|(_, id)| id).collect())
    }

    async fn load_debate(&self, id: Uuid) -> SessionResult<Option<Debate>> {
        Ok(self.debates.read().await.get(&id).cloned())
    }

    async fn save_debate(&self, debate: &Debate) -> SessionResult<()> {
        self.debates.write().await.insert(debate.id, debate.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Side;

    #[tokio::test]
    async fn test_save_load_remove() {
        let store = InMemorySessionStore::new();
        let conversation = Conversation::new(1, Side::Supporting);

        assert!(store.load(conversation.id).await.unwrap().is_none());
        store.save(&conversation).await.unwrap();
        assert_eq!(
            store.load(conversation.id).await.unwrap(),
            Some(conversation.clone())
        );
        assert_eq!(store.list().await.unwrap(), vec![conversation.id]);

        assert!(store.remove(conversation.id).await.unwrap());
        assert!(!store.remove(conversation.id).await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_replaces_existing() {
        let store = InMemorySessionStore::new();
        let mut conversation = Conversation::new(2, Side::Opposing);
        store.save(&conversation).await.unwrap();

        conversation.context_expressions.push("p → q".to_string());
        store.save(&conversation).await.unwrap();

        let loaded = store.load(conversation.id).await.unwrap().unwrap();
        assert_eq!(loaded.context_expressions, vec!["p → q"]);
    }

    #[tokio::test]
    async fn test_debates_kept_apart_from_conversations() {
        let store = InMemorySessionStore::new();
        let debate = Debate::new("Topic", "alice", "bob");

        assert!(store.load_debate(debate.id).await.unwrap().is_none());
        store.save_debate(&debate).await.unwrap();
        assert_eq!(store.load_debate(debate.id).await.unwrap(), Some(debate.clone()));
        assert!(store.load(debate.id).await.unwrap().is_none());
        assert!(store.list().await.unwrap().is_empty());
    }
}
