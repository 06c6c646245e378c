//! Model-backed agents used by the analysis pipeline and training sessions.

pub mod error;
pub mod logic_analyst;
pub mod opponent;

pub use error::{AgentError, AgentResult};
pub use logic_analyst::{LogicAnalyst, LogicAnalystConfig};
pub use opponent::{Exchange, OpponentAgent, OpponentConfig};
