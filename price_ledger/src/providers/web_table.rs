use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use snafu::ResultExt;
use tracing::{debug, info};

use crate::{
    config::SourceConfig,
    models::record::DATE_FORMAT,
    providers::{
        ClientBuildSnafu, PriceProvider, ProviderError, ProviderInitError, RequestSnafu,
        StatusSnafu,
    },
};

/// Fetches the daily price page over HTTP.
///
/// One GET per call, with the date passed as a query parameter
/// (`?date=YYYY-MM-DD` by default). No retries.
pub struct WebTableProvider {
    client: Client,
    url: String,
    date_param: String,
}

impl WebTableProvider {
    /// Creates a new provider for the page described by `source`.
    pub fn new(source: &SourceConfig) -> Result<Self, ProviderInitError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(source.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            url: source.url.clone(),
            date_param: source.date_param.clone(),
        })
    }
}

#[async_trait]
impl PriceProvider for WebTableProvider {
    async fn fetch_document(&self, date: NaiveDate) -> Result<String, ProviderError> {
        let date = date.format(DATE_FORMAT).to_string();
        info!(url = %self.url, %date, "fetching price table");

        let response = self
            .client
            .get(&self.url)
            .query(&[(self.date_param.as_str(), date.as_str())])
            .send()
            .await
            .context(RequestSnafu { url: &self.url })?;

        let status = response.status();
        if !status.is_success() {
            return StatusSnafu {
                url: &self.url,
                status: status.as_u16(),
            }
            .fail();
        }

        let body = response
            .text()
            .await
            .context(RequestSnafu { url: &self.url })?;
        debug!(bytes = body.len(), "price table received");
        Ok(body)
    }
}
