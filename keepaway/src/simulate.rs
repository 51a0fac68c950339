//! Orchestration for `keepaway run` and `keepaway simulate`.
//!
//! Every run builds its own [`Simulation`] from the shared definitions, so
//! the relief and bound runs never observe each other's queue state.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::core::containment::ContainmentStrategy;
use crate::core::engine::Simulation;
use crate::core::ranking::top_two_product;
use crate::core::types::{ActorDef, StrategyKind};
use crate::io::config::SimConfig;
use crate::io::loader::load_troop;
use crate::report::{Report, RunReport};

/// Play one strategy for `rounds` rounds on a fresh simulation.
pub fn run_strategy(
    defs: &[ActorDef],
    kind: StrategyKind,
    rounds: u32,
    cfg: &SimConfig,
) -> Result<RunReport> {
    let mut sim = Simulation::from_defs(defs).context("build simulation")?;
    let containment = match kind {
        StrategyKind::Relief => ContainmentStrategy::Relief {
            divisor: cfg.relief_divisor,
        },
        StrategyKind::Bound => sim.bound_strategy().context("derive containment modulus")?,
    };

    info!(strategy = %kind, rounds, actors = defs.len(), "run started");
    let progress_interval = cfg.progress_interval.max(1);
    let inspections = sim
        .run_observed(rounds, containment, |round, _| {
            if round % progress_interval == 0 && round != rounds {
                info!(strategy = %kind, round, rounds, "progress");
            }
        })
        .with_context(|| format!("{kind} run"))?;
    let answer = top_two_product(&inspections).context("rank inspection counts")?;
    info!(strategy = %kind, answer, "run finished");

    Ok(RunReport {
        strategy: kind,
        rounds,
        inspections,
        answer,
    })
}

/// Play the relief and bound runs with their configured round counts.
pub fn run_both(defs: &[ActorDef], cfg: &SimConfig) -> Result<Report> {
    let relief = run_strategy(defs, StrategyKind::Relief, cfg.relief_rounds, cfg)?;
    let bound = run_strategy(defs, StrategyKind::Bound, cfg.bound_rounds, cfg)?;
    Ok(Report { relief, bound })
}

/// Load definitions from `input` and play both runs.
pub fn run_from_path(input: &Path, cfg: &SimConfig) -> Result<Report> {
    let defs = load_troop(input)?;
    run_both(&defs, cfg)
}
