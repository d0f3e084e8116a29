mod agent;
mod cli;
mod client;
mod config;
mod logging;
mod session;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(cli.run());
    // stdin is read on a blocking thread that may still be parked after an
    // interrupt; don't wait for it.
    runtime.shutdown_background();
    result
}
