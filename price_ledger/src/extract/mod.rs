//! Turning the fetched price page into a [`ReadingSet`].
//!
//! Extraction happens in two steps:
//! - [`DocumentExtractor`] finds the hourly title marker, walks to its parent
//!   and collects the text of every row block beneath it (24 expected).
//! - [`parse_price_line`] pulls the single price out of one row's text,
//!   skipping fragments such as the `00:00 - 01:00` hour label.
//!
//! The resulting values are taken in document order as hours 00 through 23.

use scraper::{ElementRef, Html, Selector};
use snafu::{Backtrace, OptionExt, ResultExt, Snafu, ensure};
use tracing::debug;

use crate::{
    config::ExtractConfig,
    ledger::LedgerError,
    models::record::{HOURS_PER_DAY, ReadingSet},
};

/// The price could not be read from one row's text.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum PriceLineError {
    #[snafu(display("No price found in {text:?}"))]
    NoPriceFound { text: String, backtrace: Backtrace },
}

/// Errors raised while extracting the reading set from a document.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ExtractError {
    /// A configured CSS selector does not parse.
    #[snafu(display("Invalid CSS selector {selector:?}: {message}"))]
    InvalidSelector {
        selector: String,
        message: String,
        backtrace: Backtrace,
    },

    /// The hourly title marker is missing from the document.
    #[snafu(display("Title marker {selector:?} not found in document"))]
    TitleNotFound {
        selector: String,
        backtrace: Backtrace,
    },

    /// The document does not hold one row block per hour.
    #[snafu(display("Expected {expected} hourly rows, found {actual}"))]
    RowCount {
        expected: usize,
        actual: usize,
        backtrace: Backtrace,
    },

    /// The row for `hour` carries no readable price.
    #[snafu(display("Row for hour {hour}: {source}"))]
    Row {
        hour: usize,
        #[snafu(backtrace)]
        source: PriceLineError,
    },

    /// The extracted values do not form a valid reading set.
    #[snafu(display("Extracted readings rejected: {source}"))]
    Readings {
        #[snafu(backtrace)]
        source: LedgerError,
    },
}

/// Extracts the leading price from one row's text.
///
/// The text is split into lines; lines that contain no digit, or that contain
/// a `:` (hour-range labels), are discarded. What remains is joined and its
/// first whitespace-separated token is parsed as a decimal number. Tokens
/// such as `inf` or `NaN` do not count as prices.
///
/// ```
/// use price_ledger::extract::parse_price_line;
///
/// let price = parse_price_line("\n\n\u{a0}\n00:00 - 01:00\n\n0.12292 €/kWh\n\n").unwrap();
/// assert_eq!(price, 0.12292);
/// ```
pub fn parse_price_line(text: &str) -> Result<f64, PriceLineError> {
    let price_text: String = text
        .lines()
        .map(str::trim)
        .filter(|line| line.chars().any(|c| c.is_ascii_digit()) && !line.contains(':'))
        .collect();

    price_text
        .split_whitespace()
        .next()
        .and_then(|token| token.parse::<f64>().ok())
        .filter(|price| price.is_finite())
        .context(NoPriceFoundSnafu { text })
}

/// Locates and parses the 24 hourly rows of a price page.
#[derive(Debug, Clone)]
pub struct DocumentExtractor {
    title: Selector,
    title_source: String,
    row: Selector,
}

impl DocumentExtractor {
    /// Compiles the selectors from `config`.
    pub fn new(config: &ExtractConfig) -> Result<Self, ExtractError> {
        Ok(Self {
            title: compile(&config.title_selector)?,
            title_source: config.title_selector.clone(),
            row: compile(&config.row_selector)?,
        })
    }

    /// Extracts one day's readings from `html`.
    ///
    /// Errors:
    /// - [`ExtractError::TitleNotFound`] when the title marker is absent
    /// - [`ExtractError::RowCount`] unless exactly 24 rows follow it
    /// - [`ExtractError::Row`] when a row has no price
    pub fn extract(&self, html: &str) -> Result<ReadingSet, ExtractError> {
        let texts = self.row_texts(html)?;
        ensure!(
            texts.len() == HOURS_PER_DAY,
            RowCountSnafu {
                expected: HOURS_PER_DAY,
                actual: texts.len(),
            }
        );

        let values = texts
            .iter()
            .enumerate()
            .map(|(hour, text)| parse_price_line(text).context(RowSnafu { hour }))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(rows = values.len(), "extracted hourly prices");

        ReadingSet::new(values).context(ReadingsSnafu)
    }

    /// Text of every row block under the title's parent, one string per row.
    ///
    /// Text nodes inside a row are joined with newlines so that an hour label
    /// and the price never run together on one line.
    fn row_texts(&self, html: &str) -> Result<Vec<String>, ExtractError> {
        let document = Html::parse_document(html);
        let title = document
            .select(&self.title)
            .next()
            .context(TitleNotFoundSnafu {
                selector: &self.title_source,
            })?;
        let container = title
            .parent()
            .and_then(ElementRef::wrap)
            .context(TitleNotFoundSnafu {
                selector: &self.title_source,
            })?;

        Ok(container
            .select(&self.row)
            .map(|row| row.text().collect::<Vec<_>>().join("\n"))
            .collect())
    }
}

fn compile(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| {
        InvalidSelectorSnafu {
            selector,
            message: e.to_string(),
        }
        .build()
    })
}
