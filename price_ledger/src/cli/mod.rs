//! Command-line surface of the `price-ledger` binary.

pub mod commands;
pub mod params;

pub use commands::Cli;
