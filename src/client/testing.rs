//! In-memory chat backend for tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::backend::ChatBackend;
use super::error::GenerationError;
use super::types::ChatMessage;

/// Records every message sequence it receives. Replies are taken from the
/// scripted queue first, then fall back to a fixed text.
#[derive(Clone, Default)]
pub struct StubBackend {
    calls: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
    scripted: Arc<Mutex<VecDeque<Result<String, GenerationError>>>>,
    fallback: String,
}

impl StubBackend {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            fallback: text.into(),
            ..Self::default()
        }
    }

    pub fn then(self, reply: Result<String, GenerationError>) -> Self {
        self.scripted.lock().unwrap().push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatBackend for StubBackend {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, GenerationError> {
        self.calls.lock().unwrap().push(messages);
        let scripted = self.scripted.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}
