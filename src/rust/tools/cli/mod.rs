// Parent `tools` module controls `cli` gating; avoid duplicating crate-level cfg here.
mod commands;
pub mod state;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use state::CliContext;

#[derive(Parser, Debug)]
#[command(name = "musmcp")]
#[command(
    version,
    about = "musmcp - Csound sound design tools: synth knobs in, WAV files out."
)]
pub struct Cli {
    /// Config file (defaults to musmcp.toml or musmcp.json in the working directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug output on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the tools over stdio (newline-delimited JSON-RPC)
    Serve,
    /// Render a plain sine tone
    Tone(commands::synth::ToneCommand),
    /// Render a subtractive sawtooth lead/bass/pluck
    Lead(commands::synth::LeadCommand),
    /// Render a kick drum
    Kick(commands::synth::KickCommand),
    /// Render an existing .csd file
    Render(commands::synth::RenderCommand),
    /// List the registered tools
    Tools(commands::catalog::ToolsCommand),
    /// Print a sound design cheat-sheet
    Lore(commands::catalog::LoreCommand),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let ctx = CliContext::load(cli.config.as_deref(), cli.verbose)?;
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async move {
        match cli.command {
            Commands::Serve => commands::serve::execute(&ctx).await?,
            Commands::Tone(command) => command.execute(&ctx).await?,
            Commands::Lead(command) => command.execute(&ctx).await?,
            Commands::Kick(command) => command.execute(&ctx).await?,
            Commands::Render(command) => command.execute(&ctx).await?,
            Commands::Tools(command) => command.execute(&ctx)?,
            Commands::Lore(command) => command.execute(&ctx)?,
        }
        Ok(())
    })
}
