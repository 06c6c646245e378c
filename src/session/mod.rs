//! Debate training sessions.
//!
//! A user picks a topic and a side, then argues against an AI opponent.
//! Every round stores both utterances with their logic analyses, and the
//! expressions produced so far become context for later analyses:
//! - `topics`: the topic catalog and debate sides
//! - `types`: conversation, round and logic-chain records
//! - `store` / `sqlite`: in-memory and SQLite persistence
//! - `trainer` / `history`: round orchestration and stored-round lookups
//! - `debate`: debates between two human speakers

pub mod debate;
pub mod history;
mod locks;
pub mod sqlite;
pub mod store;
pub mod topics;
pub mod trainer;
pub mod types;

pub use debate::{Argument, Debate, DebateService, Participant};
pub use history::SessionHistory;
pub use sqlite::SqliteSessionStore;
pub use store::{InMemorySessionStore, SessionStore};
pub use topics::{DebateTopic, Side};
pub use trainer::DebateTrainer;
pub use types::{Conversation, DebateRound, LogicChainEntry, Turn};
