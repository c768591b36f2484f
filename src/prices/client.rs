//! CoinMarketCap historical quotes client.
//!
//! Uses the public `data-api/v3/cryptocurrency/historical` endpoint, which
//! returns daily OHLC quotes for one coin over a unix-second time range.
//! No API key is required.

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::debug;

use super::models::{AssetEndpoint, HistoricalResponse};
use super::source::PriceHistorySource;
use crate::error::ApiError;
use crate::USER_AGENT;

const COINMARKETCAP_BASE_URL: &str = "https://api.coinmarketcap.com";
const HISTORICAL_PATH: &str = "/data-api/v3/cryptocurrency/historical";
const SERVICE: &str = "CoinMarketCap";

#[derive(Debug, Clone)]
pub struct CoinMarketCapClient {
    client: Client,
    base_url: String,
}

impl CoinMarketCapClient {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            base_url: COINMARKETCAP_BASE_URL.to_string(),
        }
    }

    /// Points the client at another API root (e.g. a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn history_url(&self, asset: &AssetEndpoint) -> String {
        format!(
            "{}{HISTORICAL_PATH}?id={}&convertId={}&timeStart={}&timeEnd={}",
            self.base_url, asset.id, asset.convert_id, asset.time_start, asset.time_end
        )
    }
}

impl Default for CoinMarketCapClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PriceHistorySource for CoinMarketCapClient {
    async fn fetch_history(&self, asset: &AssetEndpoint) -> Result<HistoricalResponse> {
        let url = self.history_url(asset);
        debug!(symbol = %asset.symbol, url = %url, "Fetching price history");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .with_context(|| format!("{SERVICE} request for {} failed", asset.symbol))?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(SERVICE, response).await.into());
        }

        response
            .json::<HistoricalResponse>()
            .await
            .with_context(|| format!("Failed to decode {SERVICE} history for {}", asset.symbol))
    }

    fn name(&self) -> &str {
        "coinmarketcap"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_assets;

    #[test]
    fn test_history_url_for_default_assets() {
        let client = CoinMarketCapClient::new();
        let assets = default_assets();

        assert_eq!(
            client.history_url(&assets[0]),
            "https://api.coinmarketcap.com/data-api/v3/cryptocurrency/historical\
             ?id=12949&convertId=2781&timeStart=1577932421&timeEnd=1648604021"
        );
        assert_eq!(
            client.history_url(&assets[1]),
            "https://api.coinmarketcap.com/data-api/v3/cryptocurrency/historical\
             ?id=12873&convertId=2781&timeStart=1577932421&timeEnd=1648594800"
        );
    }

    #[test]
    fn test_with_base_url_trims_slash() {
        let client = CoinMarketCapClient::new().with_base_url("http://127.0.0.1:8080/");
        assert_eq!(client.base_url, "http://127.0.0.1:8080");
        assert_eq!(client.name(), "coinmarketcap");
    }
}
