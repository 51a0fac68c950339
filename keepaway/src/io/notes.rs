//! Parser for the plain-text notes layout:
//!
//! ```text
//! Monkey 0:
//!   Starting items: 79, 98
//!   Operation: new = old * 19
//!   Test: divisible by 23
//!     If true: throw to monkey 2
//!     If false: throw to monkey 3
//! ```
//!
//! Blocks are separated by blank lines. The header index must equal the
//! block's position, since position is the actor's identity.

use std::sync::LazyLock;

use anyhow::{Context, Result, anyhow, bail};
use regex::Regex;

use crate::core::types::{ActorDef, Item};
use crate::io::loader::canonical_rule_text;

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Monkey\s+(\d+)\s*:$").unwrap());
static ITEMS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Starting items:\s*(.*)$").unwrap());
static OPERATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Operation:\s*(.+)$").unwrap());
static TEST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Test:\s*divisible by\s+(\d+)$").unwrap());
static TRUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^If true:\s*throw to monkey\s+(\d+)$").unwrap());
static FALSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^If false:\s*throw to monkey\s+(\d+)$").unwrap());

/// A non-empty, trimmed line with its 1-based line number.
type Line<'a> = (usize, &'a str);

pub fn parse_notes(text: &str) -> Result<Vec<ActorDef>> {
    split_blocks(text)
        .iter()
        .enumerate()
        .map(|(position, block)| {
            parse_block(position, block).with_context(|| format!("block {position}"))
        })
        .collect()
}

fn split_blocks(text: &str) -> Vec<Vec<Line<'_>>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push((idx + 1, line));
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

fn parse_block(position: usize, block: &[Line<'_>]) -> Result<ActorDef> {
    let [header, items, operation, test, on_true, on_false] = block else {
        let first = block.first().map_or(0, |(line_no, _)| *line_no);
        bail!(
            "line {first}: expected 6 lines per actor, found {}",
            block.len()
        );
    };

    let index: usize = capture(header, &HEADER_RE, "Monkey <n>:")?
        .parse()
        .with_context(|| format!("line {}: actor index", header.0))?;
    if index != position {
        bail!(
            "line {}: actor {index} declared at position {position}",
            header.0
        );
    }

    Ok(ActorDef {
        starting_items: parse_items(items)?,
        rule_text: canonical_rule_text(capture(operation, &OPERATION_RE, "Operation: ...")?),
        divisor: parse_number(test, &TEST_RE, "Test: divisible by <n>")?,
        on_true: parse_number(on_true, &TRUE_RE, "If true: throw to monkey <n>")?,
        on_false: parse_number(on_false, &FALSE_RE, "If false: throw to monkey <n>")?,
    })
}

fn capture<'a>(line: &Line<'a>, re: &Regex, expected: &str) -> Result<&'a str> {
    let (line_no, text) = *line;
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| anyhow!("line {line_no}: expected '{expected}', found '{text}'"))
}

fn parse_number<T>(line: &Line<'_>, re: &Regex, expected: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    capture(line, re, expected)?
        .parse()
        .with_context(|| format!("line {}: number out of range", line.0))
}

fn parse_items(line: &Line<'_>) -> Result<Vec<Item>> {
    let list = capture(line, &ITEMS_RE, "Starting items: <n>, <n>, ...")?;
    if list.trim().is_empty() {
        return Ok(Vec::new());
    }
    list.split(',')
        .map(|item| {
            item.trim()
                .parse::<Item>()
                .with_context(|| format!("line {}: invalid item '{}'", line.0, item.trim()))
        })
        .collect()
}
