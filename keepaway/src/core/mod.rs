//! Deterministic, pure simulation logic.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! actor definitions and return deterministic outputs suitable for tests.

pub mod actor;
pub mod containment;
pub mod engine;
pub mod error;
pub mod invariants;
pub mod predicate;
pub mod ranking;
pub mod rule;
pub mod types;
