use tracing::{info, warn};

use crate::client::{LlmClient, OpenAiBackend};
use crate::config::{ConfigTree, Credentials, EnvSource};
use crate::logging::{Logger, preview};

use super::error::AgentInitError;
use super::types::{AgentState, ConversationTurn};

pub const SYSTEM_PROMPT: &str = "You are an assistant that helps users solve problems. \
Answer concisely and accurately, and give useful information based on what the user needs.";

pub const FAREWELL: &str = "Goodbye!";

pub const EXIT_SENTINELS: [&str; 2] = ["quit", "exit"];

const INPUT_PREVIEW_CHARS: usize = 30;

/// True when `input` should end the session without contacting the model.
pub fn is_exit_sentinel(input: &str) -> bool {
    EXIT_SENTINELS
        .iter()
        .any(|sentinel| input.eq_ignore_ascii_case(sentinel))
}

/// Single-turn chat agent with a fixed system prompt.
pub struct ConversationAgent {
    client: LlmClient,
    system_prompt: String,
    state: AgentState,
    logger: Logger,
}

impl ConversationAgent {
    pub fn new(client: LlmClient, system_prompt: impl Into<String>, logger: Logger) -> Self {
        Self {
            client,
            system_prompt: system_prompt.into(),
            state: AgentState::Ready,
            logger,
        }
    }

    /// Resolves credentials and builds the HTTP-backed agent. Any failure
    /// here is fatal to the caller.
    pub fn from_config(config: &ConfigTree, env: &dyn EnvSource) -> Result<Self, AgentInitError> {
        let credentials = Credentials::resolve(config, env, &Logger::new("credentials"))?;
        let backend = OpenAiBackend::new(&credentials)?;
        let logger = Logger::new("agent");
        info!(
            parent: logger.span(),
            model = backend.model(),
            temperature = credentials.temperature,
            "LLM client ready"
        );

        let client = LlmClient::new(Box::new(backend), Logger::new("llm-client"));
        Ok(Self::new(client, SYSTEM_PROMPT, logger))
    }

    #[cfg(test)]
    pub fn state(&self) -> AgentState {
        self.state
    }

    /// Answers one line of operator input. Exit sentinels end the session
    /// and return [`FAREWELL`]; everything else goes to the model and its
    /// reply (or rendered error) comes back verbatim.
    pub async fn respond(&mut self, user_input: &str) -> String {
        self.take_turn(user_input).await.response_text
    }

    pub async fn take_turn(&mut self, user_input: &str) -> ConversationTurn {
        let response_text = if is_exit_sentinel(user_input) {
            if self.state == AgentState::Ready {
                self.state = AgentState::Ended;
                info!(parent: self.logger.span(), "chat ended");
            }
            FAREWELL.to_string()
        } else if self.state == AgentState::Ended {
            warn!(parent: self.logger.span(), "input received after the session ended; ignoring");
            FAREWELL.to_string()
        } else {
            info!(
                parent: self.logger.span(),
                "processing user input: {}",
                preview(user_input, INPUT_PREVIEW_CHARS)
            );
            self.client
                .generate(user_input, Some(&self.system_prompt))
                .await
        };

        ConversationTurn {
            user_text: user_input.to_string(),
            system_prompt: self.system_prompt.clone(),
            response_text,
        }
    }
}
