use chrono::{Local, NaiveDate};

use crate::models::record::parse_date;

/// clap value parser for `--date`.
pub fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).map_err(|e| e.to_string())
}

/// The requested date, or today's local date when none was given.
pub fn resolve_date(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Local::now().date_naive())
}
