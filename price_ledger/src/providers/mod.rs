//! Provider abstraction for the upstream price page.
//!
//! This module defines the [`PriceProvider`] trait, the seam between the
//! pipeline and wherever the hourly price document comes from. The shipped
//! implementation is [`web_table::WebTableProvider`], which performs a single
//! HTTP GET per run; tests substitute in-memory providers.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use chrono::NaiveDate;
//! use price_ledger::providers::{PriceProvider, ProviderError};
//!
//! struct CannedProvider(String);
//!
//! #[async_trait]
//! impl PriceProvider for CannedProvider {
//!     async fn fetch_document(&self, _date: NaiveDate) -> Result<String, ProviderError> {
//!         Ok(self.0.clone())
//!     }
//! }
//! ```

pub mod web_table;

use async_trait::async_trait;
use chrono::NaiveDate;
use snafu::{Backtrace, Snafu};

/// Fetches the raw price document for one calendar day.
#[async_trait]
pub trait PriceProvider {
    /// Returns the document text for `date`.
    ///
    /// Any error means the run must stop before the ledger is touched.
    async fn fetch_document(&self, date: NaiveDate) -> Result<String, ProviderError>;
}

/// Errors that can occur during the creation of a provider instance.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },
}

/// Upstream fetch failures.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// The request could not be sent or the body could not be read.
    #[snafu(display("Request to {url} failed: {source}"))]
    Request {
        url: String,
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The server answered with a non-success status.
    #[snafu(display("Status code {status} from {url} is not valid"))]
    Status {
        url: String,
        status: u16,
        backtrace: Backtrace,
    },
}
