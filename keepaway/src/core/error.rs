//! Typed failures raised by the simulation core.
//!
//! Every variant is fatal for the operation that produced it. A partially
//! applied rule or route would corrupt all later rounds, so nothing here is
//! recovered from inside the core.

use thiserror::Error;

use crate::core::types::{ActorId, Item};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("malformed expression '{text}': {reason}")]
    MalformedExpression { text: String, reason: String },

    #[error("actor {actor}: divisor must be > 0")]
    ZeroDivisor { actor: ActorId },

    #[error("actor {actor}: route target {target} out of range (actors: {actors})")]
    InvalidRoute {
        actor: ActorId,
        target: ActorId,
        actors: usize,
    },

    #[error("need at least 2 actors to rank, got {count}")]
    InsufficientActors { count: usize },

    #[error("actor {actor}: applying '{rule}' to {item} overflows u64")]
    Overflow {
        actor: ActorId,
        item: Item,
        rule: String,
    },

    #[error("actor {actor}: applying '{rule}' to {item} yields a negative worry level")]
    NegativeWorry {
        actor: ActorId,
        item: Item,
        rule: String,
    },

    #[error("product of actor divisors overflows u64")]
    ModulusOverflow,

    #[error("containment modulus {modulus} is not a multiple of divisor {divisor}")]
    ModulusMismatch { modulus: Item, divisor: Item },

    #[error("containment divisor must be > 0")]
    ZeroContainment,

    #[error("simulation already completed after {rounds} rounds")]
    AlreadyCompleted { rounds: u32 },

    #[error("simulation aborted during round {round}; state is no longer usable")]
    Aborted { round: u32 },

    #[error("product of top counts {first} * {second} overflows u64")]
    ProductOverflow { first: u64, second: u64 },
}

impl SimError {
    /// True for errors caused by the actor definitions themselves, as
    /// opposed to failures that only surface while rounds are played.
    pub fn is_definition_error(&self) -> bool {
        matches!(
            self,
            SimError::MalformedExpression { .. }
                | SimError::ZeroDivisor { .. }
                | SimError::InvalidRoute { .. }
        )
    }
}
