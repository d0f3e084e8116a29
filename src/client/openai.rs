use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use crate::config::{Credentials, REQUEST_TIMEOUT_SECS};

use super::backend::ChatBackend;
use super::error::{ClientInitError, GenerationError, GenerationErrorKind};
use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

/// HTTP backend for OpenAI-compatible `/chat/completions` endpoints.
#[derive(Clone)]
pub struct OpenAiBackend {
    http: Client,
    endpoint: Url,
    api_key: String,
    model: String,
    temperature: f64,
    user_agent: String,
}

impl fmt::Debug for OpenAiBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiBackend")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl OpenAiBackend {
    pub fn new(credentials: &Credentials) -> Result<Self, ClientInitError> {
        let model = credentials.model.trim();
        if model.is_empty() || model.chars().any(char::is_whitespace) {
            return Err(ClientInitError::InvalidModel(credentials.model.clone()));
        }

        let base = credentials.base_url.trim_end_matches('/');
        let endpoint = Url::parse(&format!("{base}/chat/completions")).map_err(|err| {
            ClientInitError::InvalidBaseUrl {
                url: credentials.base_url.clone(),
                reason: err.to_string(),
            }
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ClientInitError::InvalidBaseUrl {
                url: credentials.base_url.clone(),
                reason: format!("unsupported scheme '{}'", endpoint.scheme()),
            });
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(ClientInitError::HttpClient)?;

        Ok(Self {
            http,
            endpoint,
            api_key: credentials.api_key.clone(),
            model: model.to_string(),
            temperature: credentials.temperature,
            user_agent: format!("chatloop/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatBackend for OpenAiBackend {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, GenerationError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            temperature: Some(self.temperature),
        };

        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .header("User-Agent", &self.user_agent)
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    GenerationError::timeout(format!(
                        "request timed out after {REQUEST_TIMEOUT_SECS}s"
                    ))
                } else {
                    GenerationError::network(format!("failed to reach {}: {err}", self.endpoint))
                }
            })?;

        match response.status() {
            StatusCode::OK => {
                let body = response
                    .json::<ChatCompletionResponse>()
                    .await
                    .map_err(|err| {
                        GenerationError::malformed(format!("unreadable completion body: {err}"))
                    })?;
                body.choices
                    .into_iter()
                    .next()
                    .map(|choice| choice.message.content)
                    .ok_or_else(|| GenerationError::malformed("completion returned no choices"))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(GenerationError::auth(
                "Invalid API key. Please check your API key configuration.",
            )),
            StatusCode::TOO_MANY_REQUESTS => {
                let error_text = response.text().await.unwrap_or_default();
                Err(GenerationError::new(
                    GenerationErrorKind::RateLimited,
                    format!("Too many requests. Please wait before trying again. ({error_text})"),
                ))
            }
            StatusCode::BAD_REQUEST => {
                let error_text = response.text().await.unwrap_or_default();
                Err(GenerationError::new(
                    GenerationErrorKind::InvalidRequest,
                    format!("Invalid request: {error_text}"),
                ))
            }
            status if status.is_server_error() => Err(GenerationError::new(
                GenerationErrorKind::Server,
                format!("Service is temporarily unavailable (status {status})."),
            )),
            status => {
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                Err(GenerationError::new(
                    GenerationErrorKind::Server,
                    format!("API error (status {status}): {error_text}"),
                ))
            }
        }
    }
}
