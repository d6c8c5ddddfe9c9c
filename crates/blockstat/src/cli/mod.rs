//! Subcommand implementations.

pub mod config;
pub mod matching;
pub mod scan;
