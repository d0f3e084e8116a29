use async_trait::async_trait;

use super::error::GenerationError;
use super::types::ChatMessage;

/// Chat-completion capability: ordered messages in, generated text out.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, GenerationError>;
}

pub type DynChatBackend = dyn ChatBackend;
