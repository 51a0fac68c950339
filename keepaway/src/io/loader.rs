//! Troop definition loading with schema + invariant validation.
//!
//! `.json` files use the keyed-object (or array) layout described by
//! `schemas/troop.schema.json`; every other extension is read as notes text
//! (see [`crate::io::notes`]).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::validator_for;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::core::invariants::validate_invariants;
use crate::core::rule::{Rule, compile};
use crate::core::types::{ActorDef, ActorId, Item};
use crate::io::notes::parse_notes;

const TROOP_SCHEMA: &str = include_str!("../../schemas/troop.schema.json");

/// Input layout, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Notes,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => InputFormat::Json,
            _ => InputFormat::Notes,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ActorRecord {
    starting_items: Vec<Item>,
    operation: String,
    test: TestRecord,
}

#[derive(Debug, Deserialize)]
struct TestRecord {
    operation: String,
    #[serde(rename = "true")]
    on_true: ActorId,
    #[serde(rename = "false")]
    on_false: ActorId,
}

/// Load and validate actor definitions from disk.
pub fn load_troop(path: &Path) -> Result<Vec<ActorDef>> {
    let format = InputFormat::from_path(path);
    debug!(path = %path.display(), ?format, "loading troop");
    let contents =
        fs::read_to_string(path).with_context(|| format!("read troop {}", path.display()))?;
    let defs = parse_troop(&contents, format)
        .with_context(|| format!("parse troop {}", path.display()))?;
    debug!(actors = defs.len(), "troop loaded");
    Ok(defs)
}

/// Parse and validate definitions from an in-memory document.
pub fn parse_troop(contents: &str, format: InputFormat) -> Result<Vec<ActorDef>> {
    let defs = match format {
        InputFormat::Json => parse_json(contents)?,
        InputFormat::Notes => parse_notes(contents)?,
    };
    validate_troop_invariants(&defs)?;
    Ok(defs)
}

fn parse_json(contents: &str) -> Result<Vec<ActorDef>> {
    let value: Value = serde_json::from_str(contents).context("parse json")?;
    validate_schema(&value)?;
    let records: Vec<Value> = match value {
        Value::Object(map) => map.into_iter().map(|(_, record)| record).collect(),
        Value::Array(items) => items,
        _ => bail!("troop document must be an object or an array"),
    };
    records
        .into_iter()
        .enumerate()
        .map(|(actor, record)| {
            let record: ActorRecord = serde_json::from_value(record)
                .with_context(|| format!("deserialize actor {actor}"))?;
            record_to_def(actor, record)
        })
        .collect()
}

fn record_to_def(actor: ActorId, record: ActorRecord) -> Result<ActorDef> {
    let divisor = match compile(&record.test.operation)
        .with_context(|| format!("actor {actor}: compile test operation"))?
    {
        Rule::Mod(divisor) => divisor,
        other => bail!("actor {actor}: test operation must be `old % <divisor>`, got '{other}'"),
    };
    Ok(ActorDef {
        starting_items: record.starting_items,
        rule_text: canonical_rule_text(&record.operation),
        divisor,
        on_true: record.test.on_true,
        on_false: record.test.on_false,
    })
}

/// Canonical rendering of a rule, or the trimmed raw text when it does not
/// compile (invariant validation reports it with the other violations).
pub(crate) fn canonical_rule_text(raw: &str) -> String {
    compile(raw)
        .map(|rule| rule.to_string())
        .unwrap_or_else(|_| raw.trim().to_string())
}

fn validate_schema(troop: &Value) -> Result<()> {
    let schema_value: Value = serde_json::from_str(TROOP_SCHEMA).context("parse troop schema")?;
    let compiled =
        validator_for(&schema_value).map_err(|err| anyhow!("invalid schema: {}", err))?;
    if !compiled.is_valid(troop) {
        let messages = compiled
            .iter_errors(troop)
            .map(|err| err.to_string())
            .collect::<Vec<_>>();
        return Err(anyhow!(
            "troop schema validation failed: {}",
            messages.join("; ")
        ));
    }
    Ok(())
}

fn validate_troop_invariants(defs: &[ActorDef]) -> Result<()> {
    let errors = validate_invariants(defs);
    if errors.is_empty() {
        return Ok(());
    }
    let messages = errors.iter().map(ToString::to_string).collect::<Vec<_>>();
    Err(anyhow!("troop invariants failed: {}", messages.join("; ")))
}
