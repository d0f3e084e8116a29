use std::path::PathBuf;

use thiserror::Error;

/// Failure reading or parsing the config file. Recovered inside
/// [`ConfigTree::load`](super::ConfigTree::load).
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed reading config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed parsing TOML config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("API key not found. Set {env_var} or add `{config_path}` to the config file")]
    MissingApiKey {
        config_path: String,
        env_var: &'static str,
    },
}
