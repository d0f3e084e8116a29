use thiserror::Error;

use crate::client::ClientInitError;
use crate::config::CredentialError;

/// Fatal failure while building the agent.
#[derive(Debug, Error)]
pub enum AgentInitError {
    #[error(transparent)]
    MissingCredential(#[from] CredentialError),
    #[error("LLM initialization failed: {0}")]
    ClientInit(#[from] ClientInitError),
}
