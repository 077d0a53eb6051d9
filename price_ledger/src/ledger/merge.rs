//! Insert-or-overwrite of one day's readings into a sorted ledger body.

use chrono::NaiveDate;
use tracing::debug;

use crate::{
    ledger::{
        LedgerError,
        locator::{Slot, locate},
    },
    models::record::{ReadingSet, Record, parse_date},
};

/// What a merge did to the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// A new line was inserted at `index`; later lines moved down by one.
    Inserted { index: usize },
    /// The existing line at `index` was replaced in full.
    Overwritten { index: usize },
}

impl MergeOutcome {
    pub fn index(&self) -> usize {
        match *self {
            MergeOutcome::Inserted { index } | MergeOutcome::Overwritten { index } => index,
        }
    }
}

/// Merges `readings` for the `YYYY-MM-DD` day `date` into `body`.
///
/// `body` holds record lines only (no header) sorted ascending by date.
/// On error `body` is left exactly as it was.
///
/// Errors:
/// - [`LedgerError::MalformedDate`] if `date` or a probed line's date field does not parse
pub fn merge_reading(
    body: &mut Vec<String>,
    date: &str,
    readings: &ReadingSet,
) -> Result<MergeOutcome, LedgerError> {
    let date = parse_date(date)?;
    merge_record(body, &Record::new(date, readings.clone()))
}

/// Typed form of [`merge_reading`] for an already-built [`Record`].
pub fn merge_record(body: &mut Vec<String>, record: &Record) -> Result<MergeOutcome, LedgerError> {
    let line = record.to_string();
    let slot = locate(body.as_slice(), record.date)?;
    Ok(apply(body, slot, line, record.date))
}

fn apply(body: &mut Vec<String>, slot: Slot, line: String, date: NaiveDate) -> MergeOutcome {
    match slot {
        Slot::Occupied(index) => {
            debug!(%date, index, "overwriting existing record");
            body[index] = line;
            MergeOutcome::Overwritten { index }
        }
        Slot::Vacant(index) => {
            debug!(%date, index, "inserting new record");
            body.insert(index, line);
            MergeOutcome::Inserted { index }
        }
    }
}
