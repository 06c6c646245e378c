//! SQLite-backed conversation store so training sessions survive restarts.

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::debate::Debate;
use super::store::SessionStore;
use super::topics::Side;
use super::types::Conversation;
use crate::error::{SessionError, SessionResult};

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS conversations (
    id                  TEXT    PRIMARY KEY,
    topic_id            INTEGER NOT NULL,
    user_side           TEXT    NOT NULL,
    started_at          TEXT    NOT NULL,

    -- JSON arrays
    rounds              TEXT    NOT NULL DEFAULT '[]',
    context_expressions TEXT    NOT NULL DEFAULT '[]',

    updated_at          TEXT    NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_conversations_started ON conversations(started_at);

CREATE TABLE IF NOT EXISTS debates (
    id           TEXT PRIMARY KEY,
    topic        TEXT NOT NULL,
    started_at   TEXT NOT NULL,

    -- JSON arrays
    participants TEXT NOT NULL,
    rounds       TEXT NOT NULL DEFAULT '[]',

    updated_at   TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;

#[derive(Clone)]
pub struct SqliteSessionStore {
    pool: SqlitePool,
}

impl std::fmt::Debug for SqliteSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteSessionStore").finish_non_exhaustive()
    }
}

impl SqliteSessionStore {
    pub async fn open(path: impl AsRef<Path>) -> SessionResult<Self> {
        let path = path.as_ref();
        let opts = SqliteConnectOptions::from_str(&format!("sqlite://{}", path.display()))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(opts)
            .await?;

        sqlx::query(SCHEMA_SQL).execute(&pool).await?;

        tracing::info!(path = %path.display(), "Session store opened");
        Ok(Self { pool })
    }

    fn conversation_from_row(row: &sqlx::sqlite::SqliteRow) -> SessionResult<Conversation> {
        let id: String = row.try_get("id")?;
        let topic_id: i64 = row.try_get("topic_id")?;
        let user_side: String = row.try_get("user_side")?;
        let started_at: String = row.try_get("started_at")?;
        let rounds: String = row.try_get("rounds")?;
        let context_expressions: String = row.try_get("context_expressions")?;

        Ok(Conversation {
            id: Uuid::parse_str(&id).map_err(|e| SessionError::Storage(e.to_string()))?,
            topic_id: u32::try_from(topic_id)
                .map_err(|_| SessionError::Storage(format!("Invalid topic_id in row: {topic_id}")))?,
            user_side: Side::from_str(&user_side).map_err(SessionError::Storage)?,
            started_at: DateTime::parse_from_rfc3339(&started_at)
                .map_err(|e| SessionError::Storage(e.to_string()))?
                .with_timezone(&Utc),
            rounds: serde_json::from_str(&rounds)?,
            context_expressions: serde_json::from_str(&context_expressions)?,
        })
    }

    fn debate_from_row(row: &sqlx::sqlite::SqliteRow) -> SessionResult<Debate> {
        let id: String = row.try_get("id")?;
        let started_at: String = row.try_get("started_at")?;
        let participants: String = row.try_get("participants")?;
        let rounds: String = row.try_get("rounds")?;

        Ok(Debate {
            id: Uuid::parse_str(&id).map_err(|e| SessionError::Storage(e.to_string()))?,
            topic: row.try_get("topic")?,
            started_at: DateTime::parse_from_rfc3339(&started_at)
                .map_err(|e| SessionError::Storage(e.to_string()))?
                .with_timezone(&Utc),
            participants: serde_json::from_str(&participants)?,
            rounds: serde_json::from_str(&rounds)?,
        })
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn load(&self, id: Uuid) -> SessionResult<Option<Conversation>> {
        let row = sqlx::query("SELECT * FROM conversations WHERE id = ?1")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::conversation_from_row).transpose()
    }

    async fn save(&self, c: &Conversation) -> SessionResult<()> {
        sqlx::query(
            "INSERT INTO conversations (
                id, topic_id, user_side, started_at, rounds, context_expressions, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, datetime('now'))
            ON CONFLICT(id) DO UPDATE SET
                rounds = excluded.rounds,
                context_expressions = excluded.context_expressions,
                updated_at = datetime('now')",
        )
        .bind(c.id.to_string())
        .bind(c.topic_id as i64)
        .bind(c.user_side.as_str())
        .bind(c.started_at.to_rfc3339())
        .bind(serde_json::to_string(&c.rounds)?)
        .bind(serde_json::to_string(&c.context_expressions)?)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> SessionResult<bool> {
        let result = sqlx::query("DELETE FROM conversations WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> SessionResult<Vec<Uuid>> {
        let rows = sqlx::query("SELECT id FROM conversations ORDER BY started_at ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| {
                let id: String = row.try_get("id")?;
                Uuid::parse_str(&id).map_err(|e| SessionError::Storage(e.to_string()))
            })
            .collect()
    }

    async fn load_debate(&self, id: Uuid) -> SessionResult<Option<Debate>> {
        let row = sqlx::query("SELECT * FROM debates WHERE id = ?1")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::debate_from_row).transpose()
    }

    async fn save_debate(&self, d: &Debate) -> SessionResult<()> {
        sqlx::query(
            "INSERT INTO debates (id, topic, started_at, participants, rounds, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, datetime('now'))
            ON CONFLICT(id) DO UPDATE SET
                rounds = excluded.rounds,
                updated_at = datetime('now')",
        )
        .bind(d.id.to_string())
        .bind(&d.topic)
        .bind(d.started_at.to_rfc3339())
        .bind(serde_json::to_string(&d.participants)?)
        .bind(serde_json::to_string(&d.rounds)?)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
