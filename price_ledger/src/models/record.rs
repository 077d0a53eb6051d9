//! Canonical in-memory representation of one ledger line.
//!
//! A [`Record`] pairs a calendar date with a [`ReadingSet`] of exactly
//! [`HOURS_PER_DAY`] prices, ordered hour 00 through 23. Its text form is a
//! single line: the `YYYY-MM-DD` date followed by the readings, all joined
//! with `", "`:
//!
//! ```
//! use chrono::NaiveDate;
//! use price_ledger::models::record::{ReadingSet, Record};
//!
//! let date = NaiveDate::from_ymd_opt(2022, 1, 2).unwrap();
//! let readings = ReadingSet::new(vec![0.5; 24]).unwrap();
//! let line = Record::new(date, readings).to_string();
//! assert!(line.starts_with("2022-01-02, 0.5, 0.5"));
//! ```

use std::fmt;

use chrono::NaiveDate;
use snafu::{ResultExt, ensure};

use crate::ledger::{
    LedgerError, MalformedDateSnafu, MalformedReadingSnafu, NonFiniteReadingSnafu,
    ReadingCountSnafu,
};

/// Number of hourly readings in one day's record.
pub const HOURS_PER_DAY: usize = 24;

/// `chrono` format used for the leading date field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Separator placed between fields when a record is rendered.
pub const FIELD_SEPARATOR: &str = ", ";

/// The column-label line that opens every ledger: `date, 0, 1, ..., 23`.
pub fn header_line() -> String {
    let hours: Vec<String> = (0..HOURS_PER_DAY).map(|h| h.to_string()).collect();
    format!("date{FIELD_SEPARATOR}{}", hours.join(FIELD_SEPARATOR))
}

/// Parses a `YYYY-MM-DD` calendar date, ignoring surrounding whitespace.
pub fn parse_date(value: &str) -> Result<NaiveDate, LedgerError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).context(MalformedDateSnafu { value: trimmed })
}

/// Parses only the leading date field of a record line.
///
/// This is all the merge engine needs to order records, so the 24 readings
/// that follow are never touched.
pub fn leading_date(line: &str) -> Result<NaiveDate, LedgerError> {
    let first = line.split(',').next().unwrap_or_default();
    parse_date(first)
}

/// Exactly 24 finite prices for one day, hour 00 first.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingSet(Vec<f64>);

impl ReadingSet {
    /// Validates and wraps one day of hourly prices.
    ///
    /// Errors:
    /// - [`LedgerError::ReadingCount`] unless there are exactly [`HOURS_PER_DAY`] values
    /// - [`LedgerError::NonFiniteReading`] for NaN or infinite values
    pub fn new(values: Vec<f64>) -> Result<Self, LedgerError> {
        ensure!(
            values.len() == HOURS_PER_DAY,
            ReadingCountSnafu {
                expected: HOURS_PER_DAY,
                actual: values.len(),
            }
        );
        if let Some((hour, value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return NonFiniteReadingSnafu {
                hour,
                value: *value,
            }
            .fail();
        }
        Ok(Self(values))
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// Price for the given hour of day (0-23).
    pub fn hour(&self, hour: usize) -> Option<f64> {
        self.0.get(hour).copied()
    }
}

impl TryFrom<Vec<f64>> for ReadingSet {
    type Error = LedgerError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

/// One day's prices as stored in the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Calendar day the readings belong to.
    pub date: NaiveDate,
    /// Hour-ordered prices for that day.
    pub readings: ReadingSet,
}

impl Record {
    pub fn new(date: NaiveDate, readings: ReadingSet) -> Self {
        Self { date, readings }
    }

    /// Fully parses a record line, readings included.
    ///
    /// Errors:
    /// - [`LedgerError::MalformedDate`] if the leading field is not a date
    /// - [`LedgerError::MalformedReading`] if a reading is not a decimal number
    /// - [`LedgerError::ReadingCount`] if the line does not carry 24 readings
    pub fn parse(line: &str) -> Result<Self, LedgerError> {
        let mut fields = line.split(',');
        let date = parse_date(fields.next().unwrap_or_default())?;

        let values = fields
            .enumerate()
            .map(|(hour, raw)| {
                let raw = raw.trim();
                raw.parse::<f64>()
                    .context(MalformedReadingSnafu { hour, value: raw })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(date, ReadingSet::new(values)?))
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date.format(DATE_FORMAT))?;
        for value in self.readings.values() {
            // `Display` for f64 is the shortest text that round-trips.
            write!(f, "{FIELD_SEPARATOR}{value}")?;
        }
        Ok(())
    }
}
