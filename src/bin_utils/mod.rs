//! Helpers for the `nes-example` binary

/// Methods for reading arguments
pub mod args;
/// Loads optimizer settings from a JSON file
pub mod config;
