use std::fmt;

use thiserror::Error;

/// Failure of a single chat-completion call.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct GenerationError {
    pub kind: GenerationErrorKind,
    pub message: String,
}

impl GenerationError {
    pub fn new(kind: GenerationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(GenerationErrorKind::Auth, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(GenerationErrorKind::Network, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(GenerationErrorKind::Timeout, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(GenerationErrorKind::MalformedResponse, message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationErrorKind {
    /// 401/403 from the endpoint
    Auth,
    /// Connection-level failure
    Network,
    /// Request exceeded the client timeout
    Timeout,
    /// 429
    RateLimited,
    /// 5xx or an unexpected status
    Server,
    /// 400
    InvalidRequest,
    /// Body was not a usable completion
    MalformedResponse,
}

impl fmt::Display for GenerationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GenerationErrorKind::Auth => "auth",
            GenerationErrorKind::Network => "network",
            GenerationErrorKind::Timeout => "timeout",
            GenerationErrorKind::RateLimited => "rate-limited",
            GenerationErrorKind::Server => "server",
            GenerationErrorKind::InvalidRequest => "invalid-request",
            GenerationErrorKind::MalformedResponse => "malformed-response",
        };
        write!(f, "{label}")
    }
}

/// The chat backend could not be built from the resolved credentials.
#[derive(Debug, Error)]
pub enum ClientInitError {
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("invalid model identifier '{0}'")]
    InvalidModel(String),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}
