//! HTTP client for the quote endpoint.

use std::time::Duration;

use chrono::Utc;
use fairshare_core::currency::{RateError, RateSource, RateTable};
use fairshare_shared::RatesConfig;
use tracing::{debug, instrument};

use crate::payload::{QuoteRecord, select_rates};

/// Rate source backed by a `GET` to a quote list endpoint.
#[derive(Debug, Clone)]
pub struct DolarApiSource {
    client: reqwest::Client,
    endpoint: String,
}

impl DolarApiSource {
    /// Creates a source for `endpoint` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns `RateError::SourceUnavailable` if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, RateError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("fairshare/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RateError::SourceUnavailable(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Creates a source from the `rates` configuration section.
    ///
    /// # Errors
    ///
    /// See [`DolarApiSource::new`].
    pub fn from_config(config: &RatesConfig) -> Result<Self, RateError> {
        Self::new(config.endpoint.clone(), Duration::from_secs(config.timeout_secs))
    }

    /// The endpoint this source fetches from.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn fetch_records(&self) -> Result<Vec<QuoteRecord>, RateError> {
        let unavailable = |e: reqwest::Error| RateError::SourceUnavailable(e.to_string());

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(unavailable)?
            .error_for_status()
            .map_err(unavailable)?;

        response.json::<Vec<QuoteRecord>>().await.map_err(unavailable)
    }
}

impl RateSource for DolarApiSource {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch_rates(&self) -> Result<RateTable, RateError> {
        let records = self.fetch_records().await?;
        debug!(records = records.len(), "Received quote records");
        select_rates(&records, Utc::now())
    }
}
