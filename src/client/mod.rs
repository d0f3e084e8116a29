mod backend;
mod error;
mod llm;
mod openai;
mod types;

pub use error::ClientInitError;
pub use llm::LlmClient;
pub use openai::OpenAiBackend;

#[cfg(test)]
pub use backend::ChatBackend;
#[cfg(test)]
pub use error::{GenerationError, GenerationErrorKind};
#[cfg(test)]
pub use llm::GENERATION_ERROR_PREFIX;
#[cfg(test)]
pub use types::{ChatMessage, ChatMessageRole};

#[cfg(test)]
pub(crate) mod testing;
