//! Play command - a human against a trained network over stdin/stdout

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use noughts_core::{Game, GameResult, ManualAgent, Mark, NeuralAgent};
use noughts_nn::NeuralNetwork;

#[derive(Args)]
pub struct PlayArgs {
    /// Saved network to play against
    #[arg(long, value_name = "FILE", default_value = "best_player.json")]
    pub model: PathBuf,

    /// Let the network move first; by default the human plays X
    #[arg(long)]
    pub model_first: bool,
}

/// Run play command
pub fn run(args: PlayArgs) -> Result<()> {
    let network = NeuralNetwork::load(&args.model)
        .with_context(|| format!("Failed to load network from {}", args.model.display()))?;
    tracing::debug!("Loaded network:\n{}", network);
    let model = NeuralAgent::from_network(network)
        .with_context(|| format!("{} is not a noughts player", args.model.display()))?;

    let human = ManualAgent::new(io::stdin().lock(), io::stdout());
    let human_mark = if args.model_first { Mark::O } else { Mark::X };
    println!("You are {}. Cells are numbered 0-8, left to right, top to bottom.", human_mark);

    let game = match human_mark {
        Mark::X => Game::new(&human, &model),
        Mark::O => Game::new(&model, &human),
    };
    let outcome = game.play_verbose(&mut io::stdout()).context("Failed to write to stdout")?;

    match outcome.result {
        GameResult::Tie => println!("Nobody wins."),
        result if result.winner() == Some(human_mark) => println!("You win!"),
        _ => println!("The network wins."),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: PlayArgs,
    }

    #[test]
    fn test_human_plays_x_by_default() {
        let args = Wrapper::parse_from(["noughts"]).args;
        assert!(!args.model_first);
        assert_eq!(args.model, PathBuf::from("best_player.json"));

        let args = Wrapper::parse_from(["noughts", "--model-first"]).args;
        assert!(args.model_first);
    }
}
