//! Divisibility test with explicit true/false destinations.

use crate::core::types::{ActorId, Item};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Predicate {
    pub divisor: Item,
    pub on_true: ActorId,
    pub on_false: ActorId,
}

impl Predicate {
    pub fn new(divisor: Item, on_true: ActorId, on_false: ActorId) -> Self {
        Self {
            divisor,
            on_true,
            on_false,
        }
    }

    pub fn holds(&self, value: Item) -> bool {
        value % self.divisor == 0
    }

    /// Destination for `value`.
    pub fn route(&self, value: Item) -> ActorId {
        if self.holds(value) {
            self.on_true
        } else {
            self.on_false
        }
    }

    /// Both destinations, true branch first.
    pub fn targets(&self) -> [ActorId; 2] {
        [self.on_true, self.on_false]
    }
}
