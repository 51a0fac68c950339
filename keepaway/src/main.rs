//! Item-passing simulator CLI.
//!
//! Loads a troop definition (JSON or notes text), plays the relief and
//! bound runs, and prints the inspection tallies with their top-two product.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use keepaway::core::types::StrategyKind;
use keepaway::exit_codes;
use keepaway::io::config::load_config;
use keepaway::io::loader::load_troop;
use keepaway::simulate::{run_from_path, run_strategy};
use keepaway::validate::validate_troop;

const DEFAULT_CONFIG: &str = "keepaway.toml";

#[derive(Parser)]
#[command(
    name = "keepaway",
    version,
    about = "Deterministic item-passing simulator"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play the relief and bound runs and print both answers.
    Run {
        /// Troop definition (`.json`, or notes text for any other extension).
        input: PathBuf,
        /// Simulation config; defaults apply when the file is missing.
        #[arg(long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Play a single strategy.
    Simulate {
        input: PathBuf,
        #[arg(long, value_enum)]
        strategy: StrategyArg,
        /// Override the configured round count.
        #[arg(long)]
        rounds: Option<u32>,
        #[arg(long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },
    /// Load, compile and validate definitions without simulating.
    Validate { input: PathBuf },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Relief,
    Bound,
}

impl From<StrategyArg> for StrategyKind {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Relief => StrategyKind::Relief,
            StrategyArg::Bound => StrategyKind::Bound,
        }
    }
}

fn main() {
    keepaway::logging::init();
    let code = match run() {
        Ok(()) => exit_codes::OK,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::for_error(&err)
        }
    };
    std::process::exit(code);
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            input,
            config,
            json,
        } => cmd_run(&input, &config, json),
        Command::Simulate {
            input,
            strategy,
            rounds,
            config,
        } => cmd_simulate(&input, strategy.into(), rounds, &config),
        Command::Validate { input } => cmd_validate(&input),
    }
}

fn cmd_run(input: &Path, config: &Path, json: bool) -> Result<()> {
    let cfg = load_config(config)?;
    let report = run_from_path(input, &cfg)?;
    if json {
        print!("{}", report.to_json()?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}

fn cmd_simulate(
    input: &Path,
    kind: StrategyKind,
    rounds: Option<u32>,
    config: &Path,
) -> Result<()> {
    let cfg = load_config(config)?;
    let defs = load_troop(input)?;
    let rounds = rounds.unwrap_or_else(|| cfg.rounds_for(kind));
    let report = run_strategy(&defs, kind, rounds, &cfg)?;
    println!("{}", report.render_line());
    Ok(())
}

fn cmd_validate(input: &Path) -> Result<()> {
    let outcome = validate_troop(input)?;
    let modulus = outcome
        .containment_modulus
        .map_or_else(|| "overflow".to_string(), |m| m.to_string());
    println!(
        "validate: actors={} items={} modulus={}",
        outcome.actors, outcome.items, modulus
    );
    for (idx, rule) in outcome.rules.iter().enumerate() {
        println!("validate: actor {idx}: new = {rule}");
    }
    Ok(())
}
