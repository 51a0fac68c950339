//! Worry containment applied after every inspection.
//!
//! Both strategies are pure. `Bound` only preserves predicate outcomes when
//! its modulus is a multiple of every actor divisor, since
//! `x % d == (x % M) % d` whenever `d | M`; the engine checks this before a
//! run starts.

use crate::core::rule::Wide;
use crate::core::types::{Item, StrategyKind};

/// Standard relief divisor applied after each inspection.
pub const RELIEF_DIVISOR: Item = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainmentStrategy {
    /// `x / divisor`.
    Relief { divisor: Item },
    /// `x % modulus`.
    Bound { modulus: Item },
}

impl ContainmentStrategy {
    pub fn relief() -> Self {
        ContainmentStrategy::Relief {
            divisor: RELIEF_DIVISOR,
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            ContainmentStrategy::Relief { .. } => StrategyKind::Relief,
            ContainmentStrategy::Bound { .. } => StrategyKind::Bound,
        }
    }

    /// Reduce a freshly transformed worry level.
    ///
    /// Callers construct strategies with non-zero operands (the engine
    /// rejects zero before the first round). A `Bound` result is below the
    /// modulus and always fits in [`Item`]; a `Relief` result may not.
    pub fn reduce(&self, value: Wide) -> Wide {
        match *self {
            ContainmentStrategy::Relief { divisor } => value / Wide::from(divisor),
            ContainmentStrategy::Bound { modulus } => value % Wide::from(modulus),
        }
    }

    pub(crate) fn operand(&self) -> Item {
        match *self {
            ContainmentStrategy::Relief { divisor } => divisor,
            ContainmentStrategy::Bound { modulus } => modulus,
        }
    }
}

/// Product of all divisors, or `None` if it does not fit in `u64`.
///
/// An empty set of divisors yields 1, which reduces every item to zero.
pub fn containment_modulus<I>(divisors: I) -> Option<Item>
where
    I: IntoIterator<Item = Item>,
{
    divisors
        .into_iter()
        .try_fold(1 as Item, |acc, divisor| acc.checked_mul(divisor))
}
