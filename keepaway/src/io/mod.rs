//! I/O helpers: definition loading and configuration.

pub mod config;
pub mod loader;
pub mod notes;
