//! The ordered price ledger: a header line plus date-sorted record lines.
//!
//! [`Ledger`] owns the text lines exactly as they are persisted. Record lines
//! are kept strictly ascending by their leading date with no date repeated;
//! [`Ledger::parse`] rejects text that breaks this, and [`Ledger::merge`]
//! preserves it through [`merge::merge_record`].
//!
//! Only the leading date of a line is ever interpreted here. Readings are
//! carried as opaque text so that old rows survive a run byte-for-byte.

pub mod locator;
pub mod merge;

use chrono::NaiveDate;
use snafu::{Backtrace, Snafu};

use crate::models::record::{ReadingSet, Record, header_line, leading_date, parse_date};

use self::merge::MergeOutcome;

/// Errors raised while reading, validating or merging ledger records.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum LedgerError {
    /// A date field (target or existing record) is not a `YYYY-MM-DD` calendar date.
    #[snafu(display("Malformed date field {value:?}: {source}"))]
    MalformedDate {
        value: String,
        source: chrono::ParseError,
        backtrace: Backtrace,
    },

    /// A reading set does not hold one value per hour of the day.
    #[snafu(display("Expected {expected} hourly readings, got {actual}"))]
    ReadingCount {
        expected: usize,
        actual: usize,
        backtrace: Backtrace,
    },

    /// A reading is NaN or infinite.
    #[snafu(display("Reading for hour {hour} is not finite: {value}"))]
    NonFiniteReading {
        hour: usize,
        value: f64,
        backtrace: Backtrace,
    },

    /// A stored reading is not a decimal number.
    #[snafu(display("Malformed reading {value:?} for hour {hour}: {source}"))]
    MalformedReading {
        hour: usize,
        value: String,
        source: std::num::ParseFloatError,
        backtrace: Backtrace,
    },

    /// A bounded search was given a range that does not fit the lines searched.
    #[snafu(display("Search bounds {start}..{end} out of range for {len} lines"))]
    SearchBounds {
        start: usize,
        end: usize,
        len: usize,
        backtrace: Backtrace,
    },

    /// Record lines are out of order or repeat a date.
    #[snafu(display(
        "Ledger is not strictly ordered at line {line}: {date} does not follow {previous}"
    ))]
    UnsortedLedger {
        /// 1-based line number in the persisted text (the header is line 1).
        line: usize,
        previous: NaiveDate,
        date: NaiveDate,
        backtrace: Backtrace,
    },
}

/// Header plus ascending record lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    header: String,
    body: Vec<String>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// A ledger with the standard header and no records.
    pub fn new() -> Self {
        Self {
            header: header_line(),
            body: Vec::new(),
        }
    }

    /// Builds a ledger from persisted text and validates its order.
    ///
    /// The first line is taken verbatim as the header. Both `\n` and `\r\n`
    /// endings are accepted and trailing blank lines are dropped. Empty text
    /// yields [`Ledger::new`].
    ///
    /// Errors:
    /// - [`LedgerError::MalformedDate`] for a record line without a leading date
    /// - [`LedgerError::UnsortedLedger`] if dates are not strictly ascending
    pub fn parse(text: &str) -> Result<Self, LedgerError> {
        let mut lines: Vec<&str> = text.lines().collect();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }

        let Some((header, body)) = lines.split_first() else {
            return Ok(Self::new());
        };

        let ledger = Self {
            header: header.to_string(),
            body: body.iter().map(|l| l.to_string()).collect(),
        };
        ledger.validate_order()?;
        Ok(ledger)
    }

    /// Checks that record dates are strictly ascending.
    pub fn validate_order(&self) -> Result<(), LedgerError> {
        let mut previous: Option<NaiveDate> = None;
        for (i, line) in self.body.iter().enumerate() {
            let date = leading_date(line)?;
            if let Some(previous) = previous
                && date <= previous
            {
                return UnsortedLedgerSnafu {
                    line: i + 2,
                    previous,
                    date,
                }
                .fail();
            }
            previous = Some(date);
        }
        Ok(())
    }

    /// Inserts or overwrites the record for `date` (`YYYY-MM-DD`).
    ///
    /// See [`merge::merge_reading`]. The header is never touched.
    pub fn merge(&mut self, date: &str, readings: &ReadingSet) -> Result<MergeOutcome, LedgerError> {
        merge::merge_reading(&mut self.body, date, readings)
    }

    /// Inserts or overwrites `record`.
    pub fn merge_record(&mut self, record: &Record) -> Result<MergeOutcome, LedgerError> {
        merge::merge_record(&mut self.body, record)
    }

    /// Looks up and fully parses the record for `date`, if present.
    pub fn get(&self, date: &str) -> Result<Option<Record>, LedgerError> {
        let date = parse_date(date)?;
        match locator::locate(self.body.as_slice(), date)? {
            locator::Slot::Occupied(i) => Record::parse(&self.body[i]).map(Some),
            locator::Slot::Vacant(_) => Ok(None),
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    /// Record lines, oldest first.
    pub fn body(&self) -> &[String] {
        &self.body
    }

    /// Number of records (the header is not counted).
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// The persisted form: header and records joined by `\n`, no trailing newline.
    pub fn to_text(&self) -> String {
        let mut text = self.header.clone();
        for line in &self.body {
            text.push('\n');
            text.push_str(line);
        }
        text
    }
}
