use tracing::{debug, error};

use crate::logging::{Logger, preview};

use super::backend::DynChatBackend;
use super::types::ChatMessage;

/// Prefix that marks a failed turn in the text handed back to the caller.
pub const GENERATION_ERROR_PREFIX: &str = "generation error: ";

const REQUEST_PREVIEW_CHARS: usize = 50;

/// Turns a prompt pair into a completion, absorbing backend failures.
pub struct LlmClient {
    backend: Box<DynChatBackend>,
    logger: Logger,
}

impl LlmClient {
    pub fn new(backend: Box<DynChatBackend>, logger: Logger) -> Self {
        Self { backend, logger }
    }

    /// Never fails: a backend error comes back as text starting with
    /// [`GENERATION_ERROR_PREFIX`] and is logged separately.
    pub async fn generate(&self, user_prompt: &str, system_prompt: Option<&str>) -> String {
        let messages = build_messages(user_prompt, system_prompt);

        debug!(
            parent: self.logger.span(),
            "sending request to LLM: {}",
            preview(user_prompt, REQUEST_PREVIEW_CHARS)
        );

        match self.backend.complete(messages).await {
            Ok(text) => text,
            Err(err) => {
                error!(parent: self.logger.span(), kind = %err.kind, "LLM generation failed: {err}");
                format!("{GENERATION_ERROR_PREFIX}{err}")
            }
        }
    }
}

/// Optional system message first, then exactly one user message.
pub fn build_messages(user_prompt: &str, system_prompt: Option<&str>) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = system_prompt.filter(|s| !s.is_empty()) {
        messages.push(ChatMessage::system(system));
    }
    messages.push(ChatMessage::user(user_prompt));
    messages
}
