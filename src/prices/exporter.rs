use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use super::models::AssetEndpoint;
use super::source::PriceHistorySource;
use super::store::PriceStore;

/// Builds the per-asset closing price store and writes it as one JSON file.
pub struct PriceExporter<'a> {
    source: &'a dyn PriceHistorySource,
    assets: Vec<AssetEndpoint>,
    output_path: PathBuf,
}

impl<'a> PriceExporter<'a> {
    pub fn new(
        source: &'a dyn PriceHistorySource,
        assets: Vec<AssetEndpoint>,
        output_path: impl AsRef<Path>,
    ) -> Self {
        Self {
            source,
            assets,
            output_path: output_path.as_ref().to_path_buf(),
        }
    }

    /// Fetches every asset in order, one request at a time. The first failure
    /// aborts the whole collection.
    pub async fn collect(&self) -> Result<PriceStore> {
        let mut store = PriceStore::new();
        for asset in &self.assets {
            let history = self
                .source
                .fetch_history(asset)
                .await
                .with_context(|| format!("Failed to fetch price history for {}", asset.symbol))?;
            let series = history.closing_series();
            info!(
                source = self.source.name(),
                symbol = %asset.symbol,
                quotes = history.data.quotes.len(),
                days = series.len(),
                "Fetched closing prices"
            );
            store.insert(asset.symbol.clone(), series);
        }
        Ok(store)
    }

    /// Collects all assets, then replaces the output file. Nothing is written
    /// unless every fetch succeeded.
    pub async fn run(&self) -> Result<PriceStore> {
        let store = self.collect().await?;
        store.save(&self.output_path)?;
        info!(
            path = %self.output_path.display(),
            assets = store.len(),
            "Wrote price store"
        );
        Ok(store)
    }
}
