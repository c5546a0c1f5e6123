use anyhow::Result;
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use std::collections::HashMap;
use std::net::IpAddr;
use tracing::{debug, instrument};

use crate::core::currency::{CurrencyCatalog, ExchangeRateProvider, RateTable};
use crate::core::error::{FxError, FxResult};

const USER_AGENT: &str = "fxconv/0.1";

/// Client for the openexchangerates.org JSON API
pub struct OpenExchangeRatesProvider {
    base_url: String,
    app_id: String,
    client: reqwest::Client,
}

impl OpenExchangeRatesProvider {
    pub fn new(base_url: &str, app_id: &str) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(OpenExchangeRatesProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            app_id: app_id.to_string(),
            client,
        })
    }

    async fn get_text(&self, url: &str) -> FxResult<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FxError::Network(format!("Request error: {}", e.without_url())))?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            let detail = serde_json::from_str::<ApiErrorResponse>(&text)
                .ok()
                .and_then(|e| e.description.or(e.message))
                .unwrap_or_default();
            return Err(FxError::Network(
                format!("HTTP error: {status} {detail}").trim_end().to_string(),
            ));
        }
        if text.trim().is_empty() {
            return Err(FxError::Network("Empty response body".to_string()));
        }
        Ok(text)
    }
}

#[derive(Debug, Deserialize)]
struct LatestResponse {
    base: Option<String>,
    timestamp: Option<i64>,
    rates: Option<HashMap<String, f64>>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    message: Option<String>,
    description: Option<String>,
}

#[async_trait]
impl ExchangeRateProvider for OpenExchangeRatesProvider {
    /// Resolves the API host without sending a request.
    async fn is_online(&self) -> FxResult<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| FxError::Network(format!("Invalid base URL {}: {}", self.base_url, e)))?;
        let host = url.host_str().unwrap_or_default().to_string();
        let port = url.port_or_known_default().unwrap_or(80);

        // IP literals need no resolution; IPv6 ones come bracketed
        if host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .is_ok()
        {
            return Ok(());
        }

        let resolved = tokio::net::lookup_host((host.as_str(), port))
            .await
            .map(|mut addrs| addrs.next().is_some());
        match resolved {
            Ok(true) => Ok(()),
            Ok(false) => Err(FxError::NetworkUnavailable { host }),
            Err(e) => {
                debug!(error = %e, "Host lookup failed");
                Err(FxError::NetworkUnavailable { host })
            }
        }
    }

    #[instrument(name = "LatestRatesFetch", skip(self))]
    async fn fetch_rates(&self) -> FxResult<RateTable> {
        let url = format!("{}/latest.json?app_id={}", self.base_url, self.app_id);
        debug!("Requesting rates from {}/latest.json", self.base_url);

        let text = self.get_text(&url).await?;
        let data: LatestResponse = serde_json::from_str(&text)
            .map_err(|e| FxError::Parse(format!("Failed to parse rates response: {e}")))?;

        let rates = data
            .rates
            .ok_or_else(|| FxError::Parse("No rates found in response".to_string()))?;
        debug!(count = rates.len(), base = ?data.base, "Received rates");

        let mut table = RateTable::new(rates);
        table.base = data.base;
        table.timestamp = data.timestamp;
        Ok(table)
    }

    #[instrument(name = "CurrenciesFetch", skip(self))]
    async fn fetch_currencies(&self) -> FxResult<CurrencyCatalog> {
        let url = format!("{}/currencies.json", self.base_url);
        debug!("Requesting currency names from {}", url);

        let text = self.get_text(&url).await?;
        let names: HashMap<String, String> = serde_json::from_str(&text)
            .map_err(|e| FxError::Parse(format!("Failed to parse currencies response: {e}")))?;
        Ok(CurrencyCatalog::new(names))
    }
}
