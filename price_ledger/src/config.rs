//! Run configuration: where the price page lives and how to read it.
//!
//! Every field has a default, so the binary works without a config file. A
//! TOML file passed with `--config` overrides any subset of fields:
//!
//! ```toml
//! [source]
//! url = "https://example.com/prices"
//! timeout_secs = 10
//!
//! [extract]
//! row_selector = "div.hour-row"
//! ```
//!
//! The `PRICE_LEDGER_URL` environment variable, when set and non-blank, wins
//! over both the default and the file for `source.url`.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use shared_utils::env::env_override;
use snafu::{Backtrace, ResultExt, Snafu};
use tracing::debug;

/// Environment variable overriding [`SourceConfig::url`].
pub const URL_ENV_VAR: &str = "PRICE_LEDGER_URL";

pub const DEFAULT_SOURCE_URL: &str = "https://tarifaluzhora.es/";

/// Errors raised while loading the configuration file.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ConfigError {
    #[snafu(display("Failed to read config file {}: {source}", path.display()))]
    Read {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    #[snafu(display("Failed to parse config file {}: {source}", path.display()))]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
        backtrace: Backtrace,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub source: SourceConfig,
    pub extract: ExtractConfig,
}

/// The upstream price page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    /// Page URL; the target date is sent as a query parameter.
    pub url: String,
    /// Name of the query parameter carrying the `YYYY-MM-DD` date.
    pub date_param: String,
    /// Whole-request timeout.
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            date_param: "date".to_string(),
            timeout_secs: 30,
        }
    }
}

/// CSS selectors locating the hourly table in the page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractConfig {
    /// Marker element; its parent holds the hourly rows.
    pub title_selector: String,
    /// One match per hour under the marker's parent.
    pub row_selector: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            title_selector: "p.template-tlh__colors--hours-title".to_string(),
            row_selector: "div.row".to_string(),
        }
    }
}

impl Config {
    /// Reads `path` if given (defaults otherwise), then applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => read_config(path)?,
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Some(url) = env_override(URL_ENV_VAR) {
            debug!(%url, "source url overridden from {URL_ENV_VAR}");
            self.source.url = url;
        }
    }
}

/// Parses a TOML config file without applying environment overrides.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).context(ReadSnafu { path })?;
    toml::from_str(&text).context(ParseSnafu { path })
}
