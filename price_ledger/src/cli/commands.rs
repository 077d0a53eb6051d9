use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use crate::{cli::params::parse_date_arg, io::csv_file::DEFAULT_FILENAME};

/// Gets the energy prices of a single day and updates the CSV
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Where to save the data. Expects a path of a csv file. If the CSV exists it must be ordered
    #[arg(short = 'f', long, value_name = "FILE", default_value = DEFAULT_FILENAME)]
    pub filepath: PathBuf,

    /// The date in "YYYY-MM-DD" format (defaults to today)
    #[arg(short, long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,

    /// Path to an optional TOML config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
