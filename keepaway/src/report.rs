//! Serializable results of simulation runs.

use std::fmt::Write as _;

use serde::Serialize;

use crate::core::types::StrategyKind;

/// Outcome of a single strategy run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub strategy: StrategyKind,
    pub rounds: u32,
    /// Inspection counts in actor index order.
    pub inspections: Vec<u64>,
    /// Product of the two largest inspection counts.
    pub answer: u64,
}

/// Both standard runs over the same definitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub relief: RunReport,
    pub bound: RunReport,
}

impl RunReport {
    pub fn render_line(&self) -> String {
        let inspections = self
            .inspections
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "{}: rounds={} inspections={} answer={}",
            self.strategy, self.rounds, inspections, self.answer
        )
    }
}

impl Report {
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for run in [&self.relief, &self.bound] {
            let _ = writeln!(out, "{}", run.render_line());
        }
        out
    }

    /// Pretty-printed JSON with trailing newline.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut payload = serde_json::to_string_pretty(self)?;
        payload.push('\n');
        Ok(payload)
    }
}
