//! Validation helpers for `keepaway validate`.

use std::path::Path;

use anyhow::{Context, Result};

use crate::core::engine::Simulation;
use crate::core::types::Item;
use crate::io::loader::load_troop;

/// Summary of a definition file that loaded, compiled and validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateOutcome {
    pub actors: usize,
    pub items: usize,
    /// `None` when the divisor product does not fit in `u64`.
    pub containment_modulus: Option<Item>,
    /// Canonical rule text per actor.
    pub rules: Vec<String>,
}

/// Load, compile and validate definitions without playing any rounds.
pub fn validate_troop(input: &Path) -> Result<ValidateOutcome> {
    let defs = load_troop(input)?;
    let sim = Simulation::from_defs(&defs).context("build simulation")?;
    Ok(ValidateOutcome {
        actors: sim.actors().len(),
        items: sim.actors().iter().map(|actor| actor.items().len()).sum(),
        containment_modulus: sim.containment_modulus(),
        rules: sim
            .actors()
            .iter()
            .map(|actor| actor.rule().to_string())
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::SAMPLE_NOTES;

    #[test]
    fn validate_summarizes_sample() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("notes.txt");
        std::fs::write(&path, SAMPLE_NOTES).expect("write");

        let outcome = validate_troop(&path).expect("validate");
        assert_eq!(outcome.actors, 4);
        assert_eq!(outcome.items, 10);
        assert_eq!(outcome.containment_modulus, Some(96_577));
        assert_eq!(outcome.rules[2], "old * old");
    }

    #[test]
    fn validate_errors_on_bad_route() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("notes.txt");
        let text = SAMPLE_NOTES.replacen("throw to monkey 2", "throw to monkey 9", 1);
        std::fs::write(&path, text).expect("write");

        let err = validate_troop(&path).expect_err("validate should fail");
        assert!(format!("{err:#}").contains("route target 9 out of range"));
    }
}
