use anyhow::Result;

use super::models::{AssetEndpoint, HistoricalResponse};

#[async_trait::async_trait]
pub trait PriceHistorySource: Send + Sync {
    /// Fetches the daily quote history for one asset.
    async fn fetch_history(&self, asset: &AssetEndpoint) -> Result<HistoricalResponse>;

    fn name(&self) -> &str;
}
