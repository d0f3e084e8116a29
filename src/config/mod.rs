//! Configuration for the chat agent.
//!
//! Settings come from three layers, highest priority first:
//! - an optional TOML file (`--config`)
//! - process environment, with `.env` merged in beforehand
//! - built-in defaults
//!
//! Only the API key has no default.

mod constants;
mod credentials;
mod environment;
mod error;
mod tree;

pub use constants::{DOTENV_FILE, REQUEST_TIMEOUT_SECS};
#[cfg(test)]
pub use constants::{DEFAULT_MODEL, DEFAULT_TEMPERATURE};
pub use credentials::Credentials;
#[cfg(test)]
pub use environment::MapEnv;
pub use environment::{EnvSource, ProcessEnv, load_dotenv};
pub use error::CredentialError;
#[cfg(test)]
pub use error::ConfigLoadError;
pub use tree::ConfigTree;

#[cfg(test)]
mod tests;
