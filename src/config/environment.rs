#[cfg(test)]
use std::collections::HashMap;
use std::env;
use std::path::Path;

use anyhow::{Result, anyhow};
use tracing::{debug, warn};

use crate::logging::Logger;

/// Read access to environment variables.
pub trait EnvSource {
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone)]
pub struct ProcessEnv {
    logger: Logger,
}

impl ProcessEnv {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        match env_string(name) {
            Ok(value) => value,
            Err(err) => {
                warn!(parent: self.logger.span(), "ignoring {name}: {err}");
                None
            }
        }
    }
}

/// Fixed set of variables, detached from the process environment.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

#[cfg(test)]
impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

#[cfg(test)]
impl EnvSource for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

pub fn env_string(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(val) => Ok(Some(val)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(anyhow!("{key} contains invalid UTF-8")),
    }
}

/// Merges a dotenv file into the process environment. Variables already
/// set are left untouched; a missing file is fine.
pub fn load_dotenv(path: &Path, logger: &Logger) {
    match dotenvy::from_path(path) {
        Ok(()) => debug!(parent: logger.span(), path = %path.display(), "loaded env file"),
        Err(err) if err.not_found() => {
            debug!(parent: logger.span(), path = %path.display(), "no env file found")
        }
        Err(err) => warn!(parent: logger.span(), "failed to load {}: {err}", path.display()),
    }
}
