//! Shared deterministic types for the simulation core.
//!
//! These types define stable contracts between the loader, the engine and
//! reporting. They carry no behavior beyond plain data.

use serde::{Deserialize, Serialize};

/// Worry level carried by an actor. Fungible; only queue position orders it.
pub type Item = u64;

/// Dense index of an actor, assigned at load time and never reassigned.
pub type ActorId = usize;

/// Routing decision emitted while an actor drains its queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub to: ActorId,
    pub item: Item,
}

/// Loader output and engine input for a single actor.
///
/// Index in the surrounding list is the actor's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorDef {
    pub starting_items: Vec<Item>,
    pub rule_text: String,
    pub divisor: Item,
    pub on_true: ActorId,
    pub on_false: ActorId,
}

/// Which containment policy a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Relief,
    Bound,
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::Relief => f.write_str("relief"),
            StrategyKind::Bound => f.write_str("bound"),
        }
    }
}
