use std::fmt;

use tracing::{debug, warn};

use crate::logging::Logger;

use super::constants::*;
use super::environment::EnvSource;
use super::error::CredentialError;
use super::tree::ConfigTree;

/// Everything needed to talk to the chat-completion endpoint.
///
/// Resolved once when the agent is built and never mutated afterwards.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub api_key: String,
    pub model: String,
    pub temperature: f64,
    pub base_url: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Credentials {
    /// Resolves each setting from the config tree first, then the
    /// environment. Only the API key lacks a default.
    pub fn resolve(
        config: &ConfigTree,
        env: &dyn EnvSource,
        logger: &Logger,
    ) -> Result<Self, CredentialError> {
        let api_key = first_non_empty(config, API_KEY_PATH, env, API_KEY_ENV_VAR, logger)
            .ok_or_else(|| CredentialError::MissingApiKey {
                config_path: API_KEY_PATH.join("."),
                env_var: API_KEY_ENV_VAR,
            })?;

        let model = first_non_empty(config, MODEL_PATH, env, MODEL_ENV_VAR, logger)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let base_url = first_non_empty(config, BASE_URL_PATH, env, BASE_URL_ENV_VAR, logger)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let temperature = resolve_temperature(config, env, logger);

        Ok(Self {
            api_key,
            model,
            temperature,
            base_url,
        })
    }
}

fn first_non_empty(
    config: &ConfigTree,
    path: &[&str],
    env: &dyn EnvSource,
    env_var: &str,
    logger: &Logger,
) -> Option<String> {
    let from_config = config
        .get_or(path, String::new())
        .trim()
        .to_string();
    if !from_config.is_empty() {
        debug!(parent: logger.span(), setting = %path.join("."), "resolved from config file");
        return Some(from_config);
    }

    let from_env = env.var(env_var).map(|value| value.trim().to_string())?;
    if from_env.is_empty() {
        return None;
    }
    debug!(parent: logger.span(), setting = %path.join("."), "resolved from {env_var}");
    Some(from_env)
}

fn resolve_temperature(config: &ConfigTree, env: &dyn EnvSource, logger: &Logger) -> f64 {
    let path = TEMPERATURE_PATH.join(".");

    if let Some(value) = config.get(TEMPERATURE_PATH) {
        match config.get_or(TEMPERATURE_PATH, f64::NAN) {
            t if TEMPERATURE_RANGE.contains(&t) => return t,
            _ => warn!(parent: logger.span(), "ignoring {path} = {value}: expected a number in 0.0..=2.0"),
        }
    }

    if let Some(raw) = env.var(TEMPERATURE_ENV_VAR) {
        let raw = raw.trim();
        if !raw.is_empty() {
            match raw.parse::<f64>() {
                Ok(t) if TEMPERATURE_RANGE.contains(&t) => return t,
                _ => warn!(
                    parent: logger.span(),
                    "ignoring {TEMPERATURE_ENV_VAR}={raw}: expected a number in 0.0..=2.0"
                ),
            }
        }
    }

    DEFAULT_TEMPERATURE
}
