//! Stable exit codes for keepaway CLI commands.

use crate::core::error::SimError;

/// Command succeeded.
pub const OK: i32 = 0;
/// Input or configuration was unreadable or invalid.
pub const INVALID: i32 = 1;
/// Definitions were valid but the simulation or ranking failed.
pub const FAILED: i32 = 2;

/// Map an error chain to an exit code.
///
/// Errors without a [`SimError`] in their chain are I/O, parse or config
/// problems and count as [`INVALID`].
pub fn for_error(err: &anyhow::Error) -> i32 {
    match err
        .chain()
        .find_map(|cause| cause.downcast_ref::<SimError>())
    {
        Some(sim_err) if sim_err.is_definition_error() => INVALID,
        Some(_) => FAILED,
        None => INVALID,
    }
}
