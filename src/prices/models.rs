use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One asset's history request: market-data id, quote currency id and a
/// closed time range in unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEndpoint {
    pub symbol: String,
    pub id: u64,
    pub convert_id: u64,
    pub time_start: i64,
    pub time_end: i64,
}

/// Reply of the historical quotes endpoint. Only the fields used are modeled.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoricalResponse {
    pub data: HistoricalData,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoricalData {
    pub quotes: Vec<HistoricalQuote>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalQuote {
    /// ISO-8601 close timestamp, e.g. `2021-11-03T23:59:59.999Z`.
    pub time_close: String,
    pub quote: QuoteValues,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuoteValues {
    pub close: f64,
}

/// Date (`YYYY-MM-DD`) to closing price.
pub type ClosingSeries = BTreeMap<String, f64>;

/// Date portion of a close timestamp: its first ten characters.
pub fn date_key(time_close: &str) -> &str {
    match time_close.char_indices().nth(10) {
        Some((end, _)) => &time_close[..end],
        None => time_close,
    }
}

impl HistoricalResponse {
    /// Closing prices keyed by date. Later quotes overwrite earlier ones that
    /// share a date.
    pub fn closing_series(&self) -> ClosingSeries {
        self.data
            .quotes
            .iter()
            .map(|q| (date_key(&q.time_close).to_string(), q.quote.close))
            .collect()
    }
}
