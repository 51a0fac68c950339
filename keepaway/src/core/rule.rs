//! Inspection rules: the `old <op> <operand>` micro-language.
//!
//! Grammar (whitespace between tokens optional):
//!
//! ```text
//! rule    := ["new" "="] "old" op operand
//! op      := "+" | "-" | "*" | "/" | "%"
//! operand := <unsigned integer> | "old"
//! ```
//!
//! A self-referencing operand is only meaningful for `*`, where it compiles
//! to [`Rule::Square`]. Zero literals for `/` and `%` are rejected here so
//! that [`Rule::apply`] never divides by zero.
//!
//! Rules evaluate in [`Wide`] so that no `u64` operand pair can overflow;
//! containment brings the value back into [`Item`] range.

use std::fmt;

use crate::core::error::SimError;
use crate::core::types::Item;

/// Compiled, immutable inspection rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Add(Item),
    Sub(Item),
    Mul(Item),
    Div(Item),
    Mod(Item),
    Square,
}

/// Intermediate width of a rule result before containment.
pub type Wide = u128;

impl Rule {
    /// Apply the rule to `old`, or `None` if the result would be negative.
    pub fn apply(self, old: Item) -> Option<Wide> {
        let old = Wide::from(old);
        match self {
            Rule::Add(k) => Some(old + Wide::from(k)),
            Rule::Sub(k) => old.checked_sub(Wide::from(k)),
            Rule::Mul(k) => Some(old * Wide::from(k)),
            // Literal zero is refused by `compile`; unsigned division floors.
            Rule::Div(k) => Some(old / Wide::from(k)),
            Rule::Mod(k) => Some(old % Wide::from(k)),
            Rule::Square => Some(old * old),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Add(k) => write!(f, "old + {k}"),
            Rule::Sub(k) => write!(f, "old - {k}"),
            Rule::Mul(k) => write!(f, "old * {k}"),
            Rule::Div(k) => write!(f, "old / {k}"),
            Rule::Mod(k) => write!(f, "old % {k}"),
            Rule::Square => f.write_str("old * old"),
        }
    }
}

/// Compile rule text into a [`Rule`].
pub fn compile(text: &str) -> Result<Rule, SimError> {
    let malformed = |reason: &str| SimError::MalformedExpression {
        text: text.to_string(),
        reason: reason.to_string(),
    };

    let tokens = tokenize(text).map_err(|reason| malformed(&reason))?;
    let body = match tokens.as_slice() {
        ["new", "=", rest @ ..] => rest,
        rest => rest,
    };

    let (op, operand) = match body {
        ["old", op, operand] => (*op, *operand),
        [] => return Err(malformed("empty expression")),
        ["old", ..] => return Err(malformed("expected `old <op> <operand>`")),
        _ => return Err(malformed("left operand must be `old`")),
    };

    if operand == "old" {
        return match op {
            "*" => Ok(Rule::Square),
            _ => Err(malformed("self-reference is only supported as `old * old`")),
        };
    }

    let value: Item = operand
        .parse()
        .map_err(|_| malformed(&format!("operand '{operand}' is not an unsigned integer")))?;

    match op {
        "+" => Ok(Rule::Add(value)),
        "-" => Ok(Rule::Sub(value)),
        "*" => Ok(Rule::Mul(value)),
        "/" | "%" if value == 0 => Err(malformed("division by zero")),
        "/" => Ok(Rule::Div(value)),
        "%" => Ok(Rule::Mod(value)),
        other => Err(malformed(&format!("unknown operator '{other}'"))),
    }
}

/// Split into words (`[A-Za-z0-9]+`) and single-character symbols.
fn tokenize(text: &str) -> Result<Vec<&str>, String> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();
    while let Some((start, ch)) = chars.next() {
        if ch.is_whitespace() {
            continue;
        }
        if ch.is_ascii_alphanumeric() {
            let mut end = start + ch.len_utf8();
            while let Some(&(idx, next)) = chars.peek() {
                if !next.is_ascii_alphanumeric() {
                    break;
                }
                end = idx + next.len_utf8();
                chars.next();
            }
            tokens.push(&text[start..end]);
            continue;
        }
        if "+-*/%=".contains(ch) {
            tokens.push(&text[start..start + ch.len_utf8()]);
            continue;
        }
        return Err(format!("unexpected character '{ch}'"));
    }
    Ok(tokens)
}
