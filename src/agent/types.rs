/// Lifecycle of a [`ConversationAgent`](super::ConversationAgent).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentState {
    Ready,
    Ended,
}

/// One request/response exchange. Never stored or replayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationTurn {
    pub user_text: String,
    pub system_prompt: String,
    pub response_text: String,
}
