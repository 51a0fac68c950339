//! Semantic invariants over actor definitions not expressible via JSON Schema.

use crate::core::error::SimError;
use crate::core::rule::compile;
use crate::core::types::ActorDef;

/// Check every definition and collect all violations:
/// - rule text compiles
/// - `divisor > 0`
/// - `on_true` and `on_false` reference existing actors
pub fn validate_invariants(defs: &[ActorDef]) -> Vec<SimError> {
    let mut errors = Vec::new();
    for (actor, def) in defs.iter().enumerate() {
        if let Err(err) = compile(&def.rule_text) {
            errors.push(err);
        }
        if def.divisor == 0 {
            errors.push(SimError::ZeroDivisor { actor });
        }
        for target in [def.on_true, def.on_false] {
            if let Err(err) = check_route(actor, target, defs.len()) {
                errors.push(err);
            }
        }
    }
    errors
}

pub(crate) fn check_route(actor: usize, target: usize, actors: usize) -> Result<(), SimError> {
    if target < actors {
        return Ok(());
    }
    Err(SimError::InvalidRoute {
        actor,
        target,
        actors,
    })
}
