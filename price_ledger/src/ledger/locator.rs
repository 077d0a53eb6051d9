//! Binary search over date-ordered ledger lines.
//!
//! The locator answers one question: where does the record for a given day
//! live, or where would it have to go to keep the body sorted? Only the
//! leading date field of each probed line is parsed, and at most
//! `⌈log2(n + 1)⌉` lines are probed.

use std::{cmp::Ordering, ops::Range};

use chrono::NaiveDate;
use snafu::ensure;

use crate::{
    ledger::{LedgerError, SearchBoundsSnafu},
    models::record::leading_date,
};

/// Result of a search for a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// A record for the date already sits at this index.
    Occupied(usize),
    /// No record for the date; inserting at this index keeps the order.
    Vacant(usize),
}

impl Slot {
    pub fn index(self) -> usize {
        match self {
            Slot::Occupied(i) | Slot::Vacant(i) => i,
        }
    }

    pub fn is_found(self) -> bool {
        matches!(self, Slot::Occupied(_))
    }

    /// The `(index, found)` pair form of the slot.
    pub fn as_pair(self) -> (usize, bool) {
        (self.index(), self.is_found())
    }
}

/// Locates `date` among the ascending `lines` of a ledger body.
pub fn locate<S: AsRef<str>>(lines: &[S], date: NaiveDate) -> Result<Slot, LedgerError> {
    locate_within(lines, date, 0..lines.len())
}

/// Like [`locate`], restricted to the half-open index range `bounds`.
///
/// The returned index is absolute (relative to `lines`, not to `bounds`).
/// A range that is inverted or reaches past the end of `lines` is rejected
/// with [`LedgerError::SearchBounds`].
pub fn locate_within<S: AsRef<str>>(
    lines: &[S],
    date: NaiveDate,
    bounds: Range<usize>,
) -> Result<Slot, LedgerError> {
    locate_by(lines, date, bounds, |line| leading_date(line.as_ref()))
}

/// Generic form of the search: `date_of` extracts the ordering key of an item.
///
/// A key extraction failure aborts the search and is returned unchanged.
pub fn locate_by<T, F>(
    items: &[T],
    date: NaiveDate,
    bounds: Range<usize>,
    mut date_of: F,
) -> Result<Slot, LedgerError>
where
    F: FnMut(&T) -> Result<NaiveDate, LedgerError>,
{
    ensure!(
        bounds.start <= bounds.end && bounds.end <= items.len(),
        SearchBoundsSnafu {
            start: bounds.start,
            end: bounds.end,
            len: items.len(),
        }
    );

    let Range {
        start: mut low,
        end: mut high,
    } = bounds;

    while low < high {
        let mid = low + (high - low) / 2;
        match date_of(&items[mid])?.cmp(&date) {
            Ordering::Equal => return Ok(Slot::Occupied(mid)),
            Ordering::Less => low = mid + 1,
            Ordering::Greater => high = mid,
        }
    }

    // Everything before `low` is earlier, everything from `low` on is later.
    Ok(Slot::Vacant(low))
}
