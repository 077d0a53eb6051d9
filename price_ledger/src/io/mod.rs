//! Persistence of the ledger between runs.

pub mod csv_file;
pub mod store;
