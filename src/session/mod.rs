//! Interactive read → respond → print loop.

use std::future::Future;
use std::io::{self, Write};

use colored::Colorize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{info, warn};

use crate::agent::{ConversationAgent, is_exit_sentinel};
use crate::logging::Logger;

pub const BANNER: &str = "=== Interactive chat (type quit to exit) ===";
pub const PROMPT: &str = "You: ";
pub const REPLY_PREFIX: &str = "Agent: ";
pub const INTERRUPTED_FAREWELL: &str = "Chat interrupted, goodbye!";

/// How the loop ended. Every variant is a clean termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// An exit sentinel was entered.
    Exited,
    /// The interrupt future completed.
    Interrupted,
    /// Input reached end of file.
    InputClosed,
}

/// Drives one turn at a time: the next line is not read until the current
/// reply has been written.
pub struct SessionLoop<R, W> {
    input: R,
    output: W,
    logger: Logger,
}

impl<R, W> SessionLoop<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(input: R, output: W, logger: Logger) -> Self {
        Self {
            input,
            output,
            logger,
        }
    }

    /// Runs until an exit sentinel, end of input, or `interrupt` resolves.
    /// The interrupt is honoured both while waiting for input and while a
    /// turn is in flight.
    pub async fn run<I>(self, agent: &mut ConversationAgent, interrupt: I) -> io::Result<SessionOutcome>
    where
        I: Future<Output = ()>,
    {
        let Self {
            input,
            mut output,
            logger,
        } = self;
        tokio::pin!(interrupt);
        let mut lines = input.lines();

        writeln!(output, "{}", BANNER.bold())?;

        loop {
            write!(output, "\n{}", PROMPT.green().bold())?;
            output.flush()?;

            let line = tokio::select! {
                _ = &mut interrupt => return interrupted(&mut output, &logger),
                line = lines.next_line() => line?,
            };

            let Some(line) = line else {
                writeln!(output)?;
                info!(parent: logger.span(), "input closed, ending session");
                return Ok(SessionOutcome::InputClosed);
            };

            let response = tokio::select! {
                _ = &mut interrupt => return interrupted(&mut output, &logger),
                response = agent.respond(&line) => response,
            };

            writeln!(output, "{}{}", REPLY_PREFIX.cyan().bold(), response)?;
            output.flush()?;

            if is_exit_sentinel(&line) {
                return Ok(SessionOutcome::Exited);
            }
        }
    }
}

fn interrupted<W: Write>(output: &mut W, logger: &Logger) -> io::Result<SessionOutcome> {
    info!(parent: logger.span(), "session interrupted");
    writeln!(output, "\n\n{INTERRUPTED_FAREWELL}")?;
    output.flush()?;
    Ok(SessionOutcome::Interrupted)
}

/// Resolves on Ctrl-C. If the handler cannot be installed it never
/// resolves, so the session only ends through input.
pub async fn ctrl_c(logger: Logger) {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(parent: logger.span(), "unable to listen for Ctrl-C: {err}");
        std::future::pending::<()>().await;
    }
}
