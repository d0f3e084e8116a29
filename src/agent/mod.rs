mod conversation;
mod error;
mod types;

pub use conversation::{ConversationAgent, is_exit_sentinel};
#[cfg(test)]
pub use conversation::{FAREWELL, SYSTEM_PROMPT};
pub use error::AgentInitError;
#[cfg(test)]
pub use types::AgentState;
