//! Daily hourly energy prices, merged into a date-ordered CSV ledger.
//!
//! A run fetches one day's price page ([`providers`]), extracts its 24 hourly
//! prices ([`extract`]), merges them into the ledger with a binary-search
//! insert-or-overwrite ([`ledger`]) and writes the ledger back ([`io`]).
//! [`pipeline::run`] wires these together.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod errors;
pub mod extract;
pub mod io;
pub mod ledger;
pub mod models;
pub mod pipeline;
pub mod providers;
