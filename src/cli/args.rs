use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::logging::LogLevel;

use super::commands;

/// Entry point for the `chatloop` command-line interface.
#[derive(Debug, Parser)]
#[command(
    name = "chatloop",
    about = "Interactive chat with an OpenAI-compatible model",
    version,
    long_about = None
)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging verbosity
    #[arg(long = "log-level", value_enum, ignore_case = true, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        commands::run(self).await
    }
}
