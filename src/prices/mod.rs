//! Daily closing prices for carbon tokens from CoinMarketCap.

mod client;
mod exporter;
mod models;
mod source;
mod store;

pub use client::CoinMarketCapClient;
pub use exporter::PriceExporter;
pub use models::{
    date_key, AssetEndpoint, ClosingSeries, HistoricalData, HistoricalQuote, HistoricalResponse,
    QuoteValues,
};
pub use source::PriceHistorySource;
pub use store::PriceStore;
