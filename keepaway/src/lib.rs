//! Deterministic item-passing simulator.
//!
//! A fixed troop of actors inspects, transforms and throws worry levels to
//! one another over many rounds. The crate enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (rule compilation, actors,
//!   containment, the round engine, ranking). No I/O, fully testable in
//!   isolation.
//! - **[`io`]**: Side-effecting operations (reading definitions and
//!   configuration from disk).
//!
//! Orchestration modules ([`simulate`], [`validate`]) coordinate core logic
//! with I/O to implement CLI commands.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod report;
pub mod simulate;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod validate;
