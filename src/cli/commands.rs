use std::path::Path;

use anyhow::Result;
use tokio::io::BufReader;
use tracing::info;

use crate::agent::ConversationAgent;
use crate::config::{self, ConfigTree, ProcessEnv};
use crate::logging::{self, Logger};
use crate::session::{self, SessionLoop, SessionOutcome};

use super::args::Cli;

pub(crate) async fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);
    let logger = Logger::new("chatloop");
    info!(parent: logger.span(), "starting chat agent");

    let config_logger = Logger::new("config");
    config::load_dotenv(Path::new(config::DOTENV_FILE), &config_logger);
    let config = ConfigTree::load(cli.config.as_deref(), &config_logger);
    let env = ProcessEnv::new(config_logger);

    // Printed once by `main`; exit status 1.
    let mut agent = ConversationAgent::from_config(&config, &env)?;

    let session_logger = Logger::new("session");
    let outcome = SessionLoop::new(
        BufReader::new(tokio::io::stdin()),
        std::io::stdout(),
        session_logger.clone(),
    )
    .run(&mut agent, session::ctrl_c(session_logger))
    .await?;

    if outcome != SessionOutcome::Exited {
        info!(parent: logger.span(), ?outcome, "session ended");
    }
    Ok(())
}
