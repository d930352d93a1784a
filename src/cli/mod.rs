//! Command-line interface
//!
//! Thin wrappers around the ledger and swap operations, working against a
//! file-backed store.

pub mod commands;

pub use commands::{AppState, CliResult};
