//! Noughts CLI - Command-line interface
//!
//! Commands:
//! - train: Evolve a population of network players by self-play
//! - play: Play against a trained network

mod play;
mod train;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "noughts")]
#[command(about = "Neuro-evolved noughts and crosses")]
struct Cli {
    /// Random seed for reproducibility
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log debug output (per-generation champions, timings)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a population and save its best network
    Train(train::TrainArgs),
    /// Play against a saved network
    Play(play::PlayArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Train(args) => train::run(args, cli.seed),
        Commands::Play(args) => play::run(args),
    }
}

/// Logs go to stderr so stdout stays clean for boards and JSON
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
