use std::path::PathBuf;

use snafu::{Backtrace, Snafu};

use crate::ledger::{Ledger, LedgerError};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum StoreError {
    /// The ledger file exists but could not be read.
    #[snafu(display("Failed to read ledger {}: {source}", path.display()))]
    Read {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    /// The stored text is not a valid ordered ledger.
    #[snafu(display("Ledger {} is invalid: {source}", path.display()))]
    Corrupt {
        path: PathBuf,
        #[snafu(backtrace)]
        source: LedgerError,
    },

    /// Writing the replacement file failed.
    #[snafu(display("Failed to write ledger {}: {source}", path.display()))]
    Write {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    /// The replacement file could not be moved over the ledger.
    #[snafu(display("Failed to replace ledger {}: {source}", path.display()))]
    Persist {
        path: PathBuf,
        source: tempfile::PersistError,
        backtrace: Backtrace,
    },
}

/// Where the ledger lives between runs.
pub trait LedgerStore {
    /// Loads the ledger, or a header-only one if nothing has been stored yet.
    fn load(&self) -> Result<Ledger, StoreError>;

    /// Replaces the stored ledger with `ledger` in one step.
    fn save(&self, ledger: &Ledger) -> Result<(), StoreError>;
}
