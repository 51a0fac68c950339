//! Round-robin simulation engine.
//!
//! A round visits actors in ascending index order. Each visited actor drains
//! its queue and every emitted route is delivered before the next actor is
//! visited, so an item passed to a higher index is inspected again in the
//! same round while one passed to a lower (or the same) index waits.

use tracing::{debug, warn};

use crate::core::actor::Actor;
use crate::core::containment::{ContainmentStrategy, containment_modulus};
use crate::core::error::SimError;
use crate::core::invariants::check_route;
use crate::core::predicate::Predicate;
use crate::core::rule::compile;
use crate::core::types::{ActorDef, Item};

/// Lifecycle of a [`Simulation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Constructed,
    Running { round: u32 },
    Completed { rounds: u32 },
    Aborted { round: u32 },
}

#[derive(Debug, Clone)]
pub struct Simulation {
    actors: Vec<Actor>,
    containment_modulus: Option<Item>,
    phase: Phase,
}

impl Simulation {
    /// Compile and validate definitions into a fresh simulation.
    ///
    /// Each run needs its own instance; rounds consume queue state.
    pub fn from_defs(defs: &[ActorDef]) -> Result<Self, SimError> {
        let mut actors = Vec::with_capacity(defs.len());
        for (id, def) in defs.iter().enumerate() {
            let rule = compile(&def.rule_text)?;
            if def.divisor == 0 {
                return Err(SimError::ZeroDivisor { actor: id });
            }
            let predicate = Predicate::new(def.divisor, def.on_true, def.on_false);
            for target in predicate.targets() {
                check_route(id, target, defs.len())?;
            }
            debug!(actor = id, %rule, divisor = def.divisor, items = def.starting_items.len(), "actor compiled");
            actors.push(Actor::new(id, rule, predicate, def.starting_items.iter().copied()));
        }

        let containment_modulus =
            containment_modulus(actors.iter().map(|actor| actor.predicate().divisor));
        if containment_modulus.is_none() {
            warn!("product of divisors overflows u64; bound containment unavailable");
        }

        Ok(Self {
            actors,
            containment_modulus,
            phase: Phase::Constructed,
        })
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Product of all actor divisors, if it fits in `u64`.
    pub fn containment_modulus(&self) -> Option<Item> {
        self.containment_modulus
    }

    /// Modular-bound strategy using this simulation's containment modulus.
    pub fn bound_strategy(&self) -> Result<ContainmentStrategy, SimError> {
        self.containment_modulus
            .map(|modulus| ContainmentStrategy::Bound { modulus })
            .ok_or(SimError::ModulusOverflow)
    }

    /// Inspection counts in actor index order.
    pub fn inspection_counts(&self) -> Vec<u64> {
        self.actors.iter().map(Actor::inspections).collect()
    }

    /// Play `rounds` rounds and return the final inspection counts.
    pub fn run(
        &mut self,
        rounds: u32,
        containment: ContainmentStrategy,
    ) -> Result<Vec<u64>, SimError> {
        self.run_observed(rounds, containment, |_, _| {})
    }

    /// Like [`Simulation::run`], calling `observer` after every completed round.
    pub fn run_observed<F>(
        &mut self,
        rounds: u32,
        containment: ContainmentStrategy,
        mut observer: F,
    ) -> Result<Vec<u64>, SimError>
    where
        F: FnMut(u32, &Simulation),
    {
        match self.phase {
            Phase::Constructed => {}
            Phase::Completed { rounds } => return Err(SimError::AlreadyCompleted { rounds }),
            Phase::Running { round } | Phase::Aborted { round } => {
                return Err(SimError::Aborted { round });
            }
        }
        self.check_containment(&containment)?;

        debug!(
            rounds,
            strategy = %containment.kind(),
            operand = containment.operand(),
            actors = self.actors.len(),
            "simulation started"
        );
        for round in 1..=rounds {
            self.phase = Phase::Running { round };
            if let Err(err) = self.play_round(&containment) {
                self.phase = Phase::Aborted { round };
                return Err(err);
            }
            observer(round, self);
        }
        self.phase = Phase::Completed { rounds };

        let counts = self.inspection_counts();
        debug!(rounds, counts = ?counts, "simulation completed");
        Ok(counts)
    }

    fn check_containment(&self, containment: &ContainmentStrategy) -> Result<(), SimError> {
        if containment.operand() == 0 {
            return Err(SimError::ZeroContainment);
        }
        if let ContainmentStrategy::Bound { modulus } = *containment {
            for actor in &self.actors {
                let divisor = actor.predicate().divisor;
                if modulus % divisor != 0 {
                    return Err(SimError::ModulusMismatch { modulus, divisor });
                }
            }
        }
        Ok(())
    }

    fn play_round(&mut self, containment: &ContainmentStrategy) -> Result<(), SimError> {
        let actors = self.actors.len();
        for idx in 0..actors {
            let routes = self.actors[idx].drain_and_dispatch(containment)?;
            for route in routes {
                check_route(idx, route.to, actors)?;
                self.actors[route.to].receive(route.item);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::core::rule::Rule;
    use crate::test_support::{def, sample_defs};

    fn queues(sim: &Simulation) -> Vec<Vec<Item>> {
        sim.actors()
            .iter()
            .map(|actor| actor.items().iter().copied().collect())
            .collect()
    }

    /// Unreduced reference in `u128`; only valid while raw values fit.
    fn reference_counts(defs: &[ActorDef], rounds: u32) -> Vec<u64> {
        let rules: Vec<Rule> = defs
            .iter()
            .map(|d| compile(&d.rule_text).expect("rule"))
            .collect();
        let mut queues: Vec<VecDeque<u128>> = defs
            .iter()
            .map(|d| d.starting_items.iter().map(|&item| u128::from(item)).collect())
            .collect();
        let mut counts = vec![0u64; defs.len()];
        for _ in 0..rounds {
            for idx in 0..defs.len() {
                while let Some(old) = queues[idx].pop_front() {
                    counts[idx] += 1;
                    let new = match rules[idx] {
                        Rule::Add(k) => old + u128::from(k),
                        Rule::Mul(k) => old * u128::from(k),
                        Rule::Square => old * old,
                        other => panic!("reference does not model {other}"),
                    };
                    let def = &defs[idx];
                    let to = if new % u128::from(def.divisor) == 0 {
                        def.on_true
                    } else {
                        def.on_false
                    };
                    queues[to].push_back(new);
                }
            }
        }
        counts
    }

    #[test]
    fn relief_twenty_rounds_matches_golden_counts() {
        let mut sim = Simulation::from_defs(&sample_defs()).expect("sim");
        let counts = sim.run(20, ContainmentStrategy::relief()).expect("run");
        assert_eq!(counts, vec![101, 95, 7, 105]);
        assert_eq!(sim.phase(), Phase::Completed { rounds: 20 });
    }

    #[test]
    fn relief_first_round_forwards_within_the_round() {
        let mut sim = Simulation::from_defs(&sample_defs()).expect("sim");
        sim.run(1, ContainmentStrategy::relief()).expect("run");
        assert_eq!(
            queues(&sim),
            vec![
                vec![20, 23, 27, 26],
                vec![2080, 25, 167, 207, 401, 1046],
                vec![],
                vec![],
            ]
        );
        assert_eq!(sim.inspection_counts(), vec![2, 4, 3, 5]);
    }

    #[test]
    fn containment_modulus_is_product_of_divisors() {
        let sim = Simulation::from_defs(&sample_defs()).expect("sim");
        assert_eq!(sim.containment_modulus(), Some(23 * 19 * 13 * 17));
        assert_eq!(
            sim.bound_strategy().expect("bound"),
            ContainmentStrategy::Bound { modulus: 96_577 }
        );
    }

    #[test]
    fn bound_strategy_matches_golden_checkpoints() {
        let mut sim = Simulation::from_defs(&sample_defs()).expect("sim");
        let strategy = sim.bound_strategy().expect("bound");
        let mut checkpoints = Vec::new();
        let counts = sim
            .run_observed(10_000, strategy, |round, sim| {
                if round == 1 || round == 20 || round == 1_000 {
                    checkpoints.push((round, sim.inspection_counts()));
                }
            })
            .expect("run");
        assert_eq!(
            checkpoints,
            vec![
                (1, vec![2, 4, 3, 6]),
                (20, vec![99, 97, 8, 103]),
                (1_000, vec![5204, 4792, 199, 5192]),
            ]
        );
        assert_eq!(counts, vec![52166, 47830, 1938, 52013]);
    }

    #[test]
    fn bound_branches_match_unreduced_arithmetic() {
        let defs = sample_defs();
        for rounds in 1..=15 {
            let mut sim = Simulation::from_defs(&defs).expect("sim");
            let strategy = sim.bound_strategy().expect("bound");
            let counts = sim.run(rounds, strategy).expect("run");
            assert_eq!(counts, reference_counts(&defs, rounds), "round {rounds}");
        }
    }

    #[test]
    fn any_multiple_of_the_modulus_gives_identical_branches() {
        let defs = sample_defs();
        let mut tight = Simulation::from_defs(&defs).expect("sim");
        let mut loose = Simulation::from_defs(&defs).expect("sim");
        let modulus = tight.containment_modulus().expect("modulus");
        let tight_counts = tight.run(1_000, tight.bound_strategy().expect("bound")).expect("run");
        let loose_counts = loose
            .run(1_000, ContainmentStrategy::Bound { modulus: modulus * 29 * 31 })
            .expect("run");
        assert_eq!(tight_counts, loose_counts);
    }

    #[test]
    fn identical_runs_are_deterministic() {
        let defs = sample_defs();
        let mut first = Simulation::from_defs(&defs).expect("sim");
        let mut second = Simulation::from_defs(&defs).expect("sim");
        let strategy = first.bound_strategy().expect("bound");
        first.run(500, strategy).expect("run");
        second.run(500, strategy).expect("run");
        assert_eq!(first.actors(), second.actors());
    }

    #[test]
    fn counts_never_decrease_and_items_are_conserved() {
        let defs = sample_defs();
        let total_items: usize = defs.iter().map(|d| d.starting_items.len()).sum();
        let mut sim = Simulation::from_defs(&defs).expect("sim");
        let mut previous = vec![0u64; defs.len()];
        sim.run_observed(200, ContainmentStrategy::relief(), |_, sim| {
            let counts = sim.inspection_counts();
            assert!(counts.iter().zip(&previous).all(|(now, before)| now >= before));
            let held: usize = sim.actors().iter().map(|actor| actor.items().len()).sum();
            assert_eq!(held, total_items);
            previous = counts;
        })
        .expect("run");
    }

    #[test]
    fn self_route_is_inspected_once_per_round() {
        let defs = vec![def(&[1, 2, 3], "old + 1", 1, 0, 0)];
        let mut sim = Simulation::from_defs(&defs).expect("sim");
        let counts = sim.run(5, ContainmentStrategy::Bound { modulus: 1 }).expect("run");
        assert_eq!(counts, vec![15]);
        assert_eq!(sim.actors()[0].items().len(), 3);
    }

    #[test]
    fn forward_to_higher_index_is_inspected_same_round() {
        let defs = vec![
            def(&[5], "old + 0", 1, 1, 1),
            def(&[], "old + 0", 1, 0, 0),
        ];
        let mut sim = Simulation::from_defs(&defs).expect("sim");
        sim.run(1, ContainmentStrategy::Bound { modulus: 1 }).expect("run");
        assert_eq!(sim.inspection_counts(), vec![1, 1]);
        assert_eq!(queues(&sim), vec![vec![0], vec![]]);
    }

    #[test]
    fn empty_actor_contributes_nothing() {
        let defs = vec![def(&[], "old * 2", 2, 1, 1), def(&[4], "old + 1", 5, 1, 1)];
        let mut sim = Simulation::from_defs(&defs).expect("sim");
        let counts = sim.run(3, ContainmentStrategy::relief()).expect("run");
        assert_eq!(counts, vec![0, 3]);
    }

    #[test]
    fn zero_rounds_completes_without_inspections() {
        let mut sim = Simulation::from_defs(&sample_defs()).expect("sim");
        let counts = sim.run(0, ContainmentStrategy::relief()).expect("run");
        assert_eq!(counts, vec![0, 0, 0, 0]);
        assert_eq!(sim.phase(), Phase::Completed { rounds: 0 });
    }

    #[test]
    fn completed_simulation_refuses_another_run() {
        let mut sim = Simulation::from_defs(&sample_defs()).expect("sim");
        sim.run(2, ContainmentStrategy::relief()).expect("run");
        let err = sim.run(1, ContainmentStrategy::relief()).unwrap_err();
        assert_eq!(err, SimError::AlreadyCompleted { rounds: 2 });
    }

    #[test]
    fn construction_rejects_invalid_routes() {
        let defs = vec![def(&[1], "old + 1", 3, 0, 4)];
        let err = Simulation::from_defs(&defs).unwrap_err();
        assert_eq!(
            err,
            SimError::InvalidRoute {
                actor: 0,
                target: 4,
                actors: 1
            }
        );
    }

    #[test]
    fn construction_rejects_malformed_rules_and_zero_divisors() {
        let malformed = vec![def(&[1], "old ** 2", 3, 0, 0)];
        assert!(matches!(
            Simulation::from_defs(&malformed),
            Err(SimError::MalformedExpression { .. })
        ));
        let zero = vec![def(&[1], "old + 1", 0, 0, 0)];
        assert_eq!(
            Simulation::from_defs(&zero).unwrap_err(),
            SimError::ZeroDivisor { actor: 0 }
        );
    }

    #[test]
    fn bound_modulus_must_cover_every_divisor() {
        let mut sim = Simulation::from_defs(&sample_defs()).expect("sim");
        let err = sim
            .run(1, ContainmentStrategy::Bound { modulus: 23 * 19 })
            .unwrap_err();
        assert_eq!(
            err,
            SimError::ModulusMismatch {
                modulus: 23 * 19,
                divisor: 13
            }
        );
        assert_eq!(sim.phase(), Phase::Constructed);
    }

    #[test]
    fn zero_relief_divisor_is_rejected() {
        let mut sim = Simulation::from_defs(&sample_defs()).expect("sim");
        let err = sim
            .run(1, ContainmentStrategy::Relief { divisor: 0 })
            .unwrap_err();
        assert_eq!(err, SimError::ZeroContainment);
    }

    #[test]
    fn arithmetic_failure_aborts_the_run() {
        let defs = vec![def(&[u64::MAX / 2], "old * old", 2, 0, 0)];
        let mut sim = Simulation::from_defs(&defs).expect("sim");
        let err = sim.run(3, ContainmentStrategy::relief()).unwrap_err();
        assert!(matches!(err, SimError::Overflow { actor: 0, .. }));
        assert_eq!(sim.phase(), Phase::Aborted { round: 1 });
        assert_eq!(
            sim.run(1, ContainmentStrategy::relief()).unwrap_err(),
            SimError::Aborted { round: 1 }
        );
    }

    #[test]
    fn bound_runs_with_modulus_above_u32() {
        let defs = vec![
            def(&[4_295_000_000], "old * old", 65_537, 1, 1),
            def(&[], "old + 1", 65_539, 0, 0),
        ];
        let mut sim = Simulation::from_defs(&defs).expect("sim");
        let strategy = sim.bound_strategy().expect("bound");
        assert_eq!(strategy, ContainmentStrategy::Bound { modulus: 4_295_229_443 });

        let mut first_round = Vec::new();
        let counts = sim
            .run_observed(1_000, strategy, |round, sim| {
                if round == 1 {
                    first_round = queues(sim);
                }
            })
            .expect("run");
        assert_eq!(first_round, vec![vec![1_101_336_934], vec![]]);
        assert_eq!(counts, vec![1_000, 1_000]);
    }

    #[test]
    fn divisor_product_overflow_disables_bound() {
        let defs = vec![
            def(&[1], "old + 1", u64::MAX, 1, 1),
            def(&[1], "old + 1", 3, 0, 0),
        ];
        let sim = Simulation::from_defs(&defs).expect("sim");
        assert_eq!(sim.containment_modulus(), None);
        assert_eq!(sim.bound_strategy().unwrap_err(), SimError::ModulusOverflow);
    }
}
