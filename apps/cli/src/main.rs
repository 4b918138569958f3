//! AgentSim CLI — demo shell for the mock agent response pipeline.
//!
//! Runs the simulated researcher agent and the pass-through code assistant
//! from the terminal, with live status narration.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
