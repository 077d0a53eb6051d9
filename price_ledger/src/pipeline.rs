//! One run of the job: fetch → extract → merge → persist.
//!
//! The ledger is loaded only after the page has been fetched and fully
//! extracted, and it is written back only after a successful merge. Any
//! failure therefore leaves the stored ledger exactly as it was.

use chrono::NaiveDate;
use tracing::info;

use crate::{
    errors::Error,
    extract::DocumentExtractor,
    io::store::LedgerStore,
    ledger::merge::MergeOutcome,
    models::record::Record,
    providers::PriceProvider,
};

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub date: NaiveDate,
    pub outcome: MergeOutcome,
    /// Records in the ledger after the merge.
    pub records: usize,
}

/// Fetches the prices for `date` and merges them into the stored ledger.
pub async fn run<P, S>(
    provider: &P,
    extractor: &DocumentExtractor,
    store: &S,
    date: NaiveDate,
) -> Result<RunReport, Error>
where
    P: PriceProvider + ?Sized,
    S: LedgerStore + ?Sized,
{
    let document = provider.fetch_document(date).await?;
    let readings = extractor.extract(&document)?;

    let mut ledger = store.load()?;
    let outcome = ledger.merge_record(&Record::new(date, readings))?;
    store.save(&ledger)?;

    info!(%date, ?outcome, records = ledger.len(), "ledger updated");
    Ok(RunReport {
        date,
        outcome,
        records: ledger.len(),
    })
}
