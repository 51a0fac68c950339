//! Test-only helpers for constructing actor definitions.

use crate::core::types::{ActorDef, ActorId, Item};

/// Notes-format rendering of [`sample_defs`].
pub const SAMPLE_NOTES: &str = "\
Monkey 0:
  Starting items: 79, 98
  Operation: new = old * 19
  Test: divisible by 23
    If true: throw to monkey 2
    If false: throw to monkey 3

Monkey 1:
  Starting items: 54, 65, 75, 74
  Operation: new = old + 6
  Test: divisible by 19
    If true: throw to monkey 2
    If false: throw to monkey 0

Monkey 2:
  Starting items: 79, 60, 97
  Operation: new = old * old
  Test: divisible by 13
    If true: throw to monkey 1
    If false: throw to monkey 3

Monkey 3:
  Starting items: 74
  Operation: new = old + 3
  Test: divisible by 17
    If true: throw to monkey 0
    If false: throw to monkey 1
";

/// JSON rendering of [`sample_defs`] in the keyed-object layout.
pub const SAMPLE_JSON: &str = r#"{
  "monkey_0": {"starting_items": [79, 98], "operation": "new=old*19",
               "test": {"operation": "new=old%23", "true": 2, "false": 3}},
  "monkey_1": {"starting_items": [54, 65, 75, 74], "operation": "new=old+6",
               "test": {"operation": "new=old%19", "true": 2, "false": 0}},
  "monkey_2": {"starting_items": [79, 60, 97], "operation": "new=old*old",
               "test": {"operation": "new=old%13", "true": 1, "false": 3}},
  "monkey_3": {"starting_items": [74], "operation": "new=old+3",
               "test": {"operation": "new=old%17", "true": 0, "false": 1}}
}
"#;

/// Create a definition with explicit fields.
pub fn def(
    items: &[Item],
    rule_text: &str,
    divisor: Item,
    on_true: ActorId,
    on_false: ActorId,
) -> ActorDef {
    ActorDef {
        starting_items: items.to_vec(),
        rule_text: rule_text.to_string(),
        divisor,
        on_true,
        on_false,
    }
}

/// The standard four-actor fixture.
pub fn sample_defs() -> Vec<ActorDef> {
    vec![
        def(&[79, 98], "old * 19", 23, 2, 3),
        def(&[54, 65, 75, 74], "old + 6", 19, 2, 0),
        def(&[79, 60, 97], "old * old", 13, 1, 3),
        def(&[74], "old + 3", 17, 0, 1),
    ]
}
