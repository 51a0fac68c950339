//! A single actor: item queue, inspection rule, routing predicate.

use std::collections::VecDeque;

use crate::core::containment::ContainmentStrategy;
use crate::core::error::SimError;
use crate::core::predicate::Predicate;
use crate::core::rule::Rule;
use crate::core::types::{ActorId, Item, Route};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    id: ActorId,
    items: VecDeque<Item>,
    rule: Rule,
    predicate: Predicate,
    inspections: u64,
}

impl Actor {
    pub fn new(
        id: ActorId,
        rule: Rule,
        predicate: Predicate,
        initial_items: impl IntoIterator<Item = Item>,
    ) -> Self {
        Self {
            id,
            items: initial_items.into_iter().collect(),
            rule,
            predicate,
            inspections: 0,
        }
    }

    pub fn items(&self) -> &VecDeque<Item> {
        &self.items
    }

    pub fn rule(&self) -> Rule {
        self.rule
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// Total number of items this actor has ever inspected.
    pub fn inspections(&self) -> u64 {
        self.inspections
    }

    /// Append to the tail of the queue.
    pub fn receive(&mut self, item: Item) {
        self.items.push_back(item);
    }

    /// Inspect every queued item in FIFO order and return where each goes.
    ///
    /// The queue is taken up front: items routed back to this actor are
    /// appended to a fresh queue and wait for the next visit. The rule runs
    /// in wide arithmetic and the value is narrowed only after containment.
    pub fn drain_and_dispatch(
        &mut self,
        containment: &ContainmentStrategy,
    ) -> Result<Vec<Route>, SimError> {
        let queue = std::mem::take(&mut self.items);
        let mut routes = Vec::with_capacity(queue.len());
        for item in queue {
            self.inspections += 1;
            let raised = self
                .rule
                .apply(item)
                .ok_or_else(|| SimError::NegativeWorry {
                    actor: self.id,
                    item,
                    rule: self.rule.to_string(),
                })?;
            let reduced =
                Item::try_from(containment.reduce(raised)).map_err(|_| SimError::Overflow {
                    actor: self.id,
                    item,
                    rule: self.rule.to_string(),
                })?;
            routes.push(Route {
                to: self.predicate.route(reduced),
                item: reduced,
            });
        }
        Ok(routes)
    }
}
