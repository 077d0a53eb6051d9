use thiserror::Error;

use crate::{
    config::ConfigError,
    extract::ExtractError,
    io::store::StoreError,
    ledger::LedgerError,
    providers::{ProviderError, ProviderInitError},
};

/// The unified error type for the `price_ledger` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Fetching the price page failed (network, timeout, non-success status).
    #[error("Upstream fetch error: {0}")]
    Provider(#[from] ProviderError),

    /// The HTTP client could not be set up.
    #[error("Provider initialization error: {0}")]
    ProviderInit(#[from] ProviderInitError),

    /// The page did not yield 24 hourly prices.
    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    /// A date or reading could not be merged.
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// The ledger file could not be loaded or replaced.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// An error related to configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
