use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use price_ledger::{
    cli::{Cli, params::resolve_date},
    config::Config,
    extract::DocumentExtractor,
    io::csv_file::CsvLedgerFile,
    pipeline,
    providers::web_table::WebTableProvider,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr; `RUST_LOG` overrides the default level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let date = resolve_date(cli.date);

    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    let provider = WebTableProvider::new(&config.source)?;
    let extractor = DocumentExtractor::new(&config.extract)?;
    let store = CsvLedgerFile::new(cli.filepath);

    let report = pipeline::run(&provider, &extractor, &store, date)
        .await
        .with_context(|| format!("failed to update {} for {date}", store.path().display()))?;

    info!(
        date = %report.date,
        index = report.outcome.index(),
        records = report.records,
        path = %store.path().display(),
        "done"
    );
    Ok(())
}
