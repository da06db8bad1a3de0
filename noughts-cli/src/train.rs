//! Train command - evolve network players by round-robin self-play
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_training_config(), save_results()
//! - Level 3: write_history()
//! - Level 4: file I/O

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use noughts_tournament::{GenerationSummary, Trainer, TrainingConfig, TrainingReport};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct TrainArgs {
    /// Population size
    #[arg(long, default_value = "50")]
    pub population: usize,

    /// Number of generations to run
    #[arg(long, default_value = "100")]
    pub iterations: usize,

    /// Hidden layer width; repeat for several layers
    #[arg(long = "hidden", value_name = "WIDTH", default_values_t = vec![9])]
    pub hidden: Vec<usize>,

    /// Per-weight mutation probability (0.0-1.0)
    #[arg(long, default_value = "0.03")]
    pub mutation_rate: f64,

    /// Fraction of each generation kept unchanged (0.0-1.0)
    #[arg(long, default_value = "0.1")]
    pub greedy_percent: f64,

    /// Play round-robin games on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Where to save the best network
    #[arg(long, value_name = "FILE", default_value = "best_player.json")]
    pub output: PathBuf,

    /// Also save every generation's summary as JSON
    #[arg(long, value_name = "FILE")]
    pub history: Option<PathBuf>,

    /// Print the final summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Contents of the `--history` file
#[derive(Serialize)]
struct History<'a> {
    config: &'a TrainingConfig,
    summaries: &'a [GenerationSummary],
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run train command
pub fn run(args: TrainArgs, seed: Option<u64>) -> Result<()> {
    let config = build_training_config(&args, seed);
    tracing::info!(
        "Starting training: pop={}, iterations={}, hidden={:?}",
        config.population_size,
        config.iterations,
        config.hidden_layers
    );

    check_output_paths(&args)?;

    let mut trainer = Trainer::new(config).context("Failed to create population")?;
    let report = trainer.train(|_| {}).context("Training failed")?;

    let saved_to = save_results(&report, trainer.config(), &args)?;
    print_summary(&report, &args, &saved_to)?;

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_training_config(args: &TrainArgs, seed: Option<u64>) -> TrainingConfig {
    let mut config = TrainingConfig::new(args.population, args.iterations)
        .with_hidden_layers(args.hidden.clone())
        .with_rates(args.mutation_rate, args.greedy_percent)
        .with_parallel(args.parallel);
    config.seed = seed;
    config
}

/// Fail before training if any requested output file cannot be opened
fn check_output_paths(args: &TrainArgs) -> Result<()> {
    ensure_writable(&args.output)?;
    if let Some(path) = &args.history {
        ensure_writable(path)?;
    }
    Ok(())
}

/// Save the best network and history; returns where the network ended up.
///
/// A failed network save falls back to [`fallback_output`] so the run is not lost.
fn save_results(report: &TrainingReport, config: &TrainingConfig, args: &TrainArgs) -> Result<PathBuf> {
    if let Some(path) = &args.history {
        write_history(path, config, &report.summaries)?;
        tracing::info!("Saved history to {}", path.display());
    }

    let saved_to = match report.best.save(&args.output) {
        Ok(()) => args.output.clone(),
        Err(err) => {
            let fallback = fallback_output();
            tracing::warn!(
                "Failed to save best network to {} ({}), writing {} instead",
                args.output.display(),
                err,
                fallback.display()
            );
            report
                .best
                .save(&fallback)
                .with_context(|| format!("Failed to save best network to {}", fallback.display()))?;
            fallback
        }
    };
    tracing::info!("Saved best network to {}", saved_to.display());
    Ok(saved_to)
}

fn print_summary(report: &TrainingReport, args: &TrainArgs, saved_to: &Path) -> Result<()> {
    let Some(last) = report.summaries.last() else {
        return Ok(());
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(last)?);
    } else {
        println!("{}", last);
        println!("Best network saved to {}", saved_to.display());
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn ensure_writable(path: &Path) -> Result<()> {
    std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .open(path)
        .map(|_| ())
        .with_context(|| format!("Cannot write to {}", path.display()))
}

fn fallback_output() -> PathBuf {
    std::env::temp_dir().join("noughts_best_player.json")
}

fn write_history(path: &Path, config: &TrainingConfig, summaries: &[GenerationSummary]) -> Result<()> {
    let json = serde_json::to_string_pretty(&History { config, summaries })?;
    std::fs::write(path, json).with_context(|| format!("Failed to write history to {}", path.display()))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: TrainArgs,
    }

    #[test]
    fn test_defaults() {
        let args = Wrapper::parse_from(["noughts"]).args;
        assert_eq!(args.population, 50);
        assert_eq!(args.iterations, 100);
        assert_eq!(args.hidden, vec![9]);
        assert_eq!(args.mutation_rate, 0.03);
        assert_eq!(args.greedy_percent, 0.1);
        assert!(!args.parallel);
        assert!(args.history.is_none());
    }

    #[test]
    fn test_build_training_config() {
        let args = Wrapper::parse_from([
            "noughts", "--population", "12", "--hidden", "18", "--hidden", "9", "--parallel",
        ])
        .args;
        let config = build_training_config(&args, Some(7));
        assert_eq!(config.population_size, 12);
        assert_eq!(config.hidden_layers, vec![18, 9]);
        assert_eq!(config.seed, Some(7));
        assert!(config.parallel);
    }

    #[test]
    fn test_bad_output_path_fails_before_training() {
        let history = std::env::temp_dir().join(format!("noughts_unwritten_{}.json", std::process::id()));
        let history_arg = history.to_string_lossy().into_owned();
        // Far too many generations to finish if the paths were checked afterwards
        let args = Wrapper::parse_from([
            "noughts",
            "--population", "50",
            "--iterations", "1000000",
            "--output", "/nonexistent_noughts_dir/best.json",
            "--history", history_arg.as_str(),
        ])
        .args;

        let err = run(args, Some(1)).unwrap_err();

        assert!(format!("{:#}", err).contains("Cannot write to /nonexistent_noughts_dir/best.json"));
        assert!(!history.exists());
    }

    #[test]
    fn test_failed_save_falls_back() {
        let mut trainer = Trainer::new(TrainingConfig::new(4, 1).with_seed(2)).unwrap();
        let report = trainer.train(|_| {}).unwrap();
        let args = Wrapper::parse_from(["noughts", "--output", "/nonexistent_noughts_dir/best.json"]).args;

        let saved_to = save_results(&report, trainer.config(), &args).unwrap();

        assert_eq!(saved_to, fallback_output());
        let loaded = noughts_nn::NeuralNetwork::load(&saved_to).unwrap();
        assert_eq!(loaded, report.best);
        std::fs::remove_file(&saved_to).ok();
    }

    #[test]
    fn test_ensure_writable() {
        let path = std::env::temp_dir().join(format!("noughts_writable_{}.json", std::process::id()));
        assert!(ensure_writable(&path).is_ok());
        assert!(path.exists());
        std::fs::remove_file(&path).ok();
        assert!(ensure_writable(Path::new("/nonexistent_noughts_dir/x.json")).is_err());
    }

    #[test]
    fn test_write_history() {
        let path = std::env::temp_dir().join(format!("noughts_history_{}.json", std::process::id()));
        let config = TrainingConfig::new(4, 2).with_seed(1);
        let mut trainer = Trainer::new(config).unwrap();
        let report = trainer.train(|_| {}).unwrap();

        write_history(&path, trainer.config(), &report.summaries).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["config"]["population_size"], 4);
        assert_eq!(value["summaries"].as_array().map(Vec::len), Some(2));
        assert!(value["summaries"][0]["hall_of_fame_percent"].is_null());
        std::fs::remove_file(&path).ok();
    }
}
