#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use carbondata::prices::{
    AssetEndpoint, HistoricalData, HistoricalQuote, HistoricalResponse, PriceHistorySource,
    QuoteValues,
};
use carbondata::verra::{IssuanceQuery, IssuanceRecord, IssuanceSource};
use serde_json::Value;

pub fn asset(symbol: &str, id: u64) -> AssetEndpoint {
    AssetEndpoint {
        symbol: symbol.to_string(),
        id,
        convert_id: 2781,
        time_start: 1577932421,
        time_end: 1648604021,
    }
}

pub fn history(quotes: &[(&str, f64)]) -> HistoricalResponse {
    HistoricalResponse {
        data: HistoricalData {
            quotes: quotes
                .iter()
                .map(|(time_close, close)| HistoricalQuote {
                    time_close: time_close.to_string(),
                    quote: QuoteValues { close: *close },
                })
                .collect(),
        },
    }
}

pub fn record(value: Value) -> IssuanceRecord {
    match value {
        Value::Object(map) => map,
        other => panic!("expected JSON object, got {other}"),
    }
}

/// In-memory price history keyed by symbol. Symbols marked as failing return
/// an error, as a network failure would.
#[derive(Default)]
pub struct MockPriceHistorySource {
    histories: HashMap<String, HistoricalResponse>,
    failing: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl MockPriceHistorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(mut self, symbol: &str, history: HistoricalResponse) -> Self {
        self.histories.insert(symbol.to_string(), history);
        self
    }

    pub fn fail_for(mut self, symbol: &str) -> Self {
        self.failing.push(symbol.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PriceHistorySource for MockPriceHistorySource {
    async fn fetch_history(&self, asset: &AssetEndpoint) -> Result<HistoricalResponse> {
        self.calls.lock().unwrap().push(asset.symbol.clone());
        if self.failing.contains(&asset.symbol) {
            return Err(anyhow!("connection reset while fetching {}", asset.symbol));
        }
        self.histories
            .get(&asset.symbol)
            .cloned()
            .ok_or_else(|| anyhow!("no mock history for {}", asset.symbol))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Returns a fixed record list, or fails when built with `failing()`.
#[derive(Default)]
pub struct MockIssuanceSource {
    records: Vec<IssuanceRecord>,
    fail: bool,
    queries: Mutex<Vec<IssuanceQuery>>,
}

impl MockIssuanceSource {
    pub fn new(records: Vec<IssuanceRecord>) -> Self {
        Self {
            records,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn queries(&self) -> Vec<IssuanceQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl IssuanceSource for MockIssuanceSource {
    async fn search_issuances(&self, query: &IssuanceQuery) -> Result<Vec<IssuanceRecord>> {
        self.queries.lock().unwrap().push(query.clone());
        if self.fail {
            return Err(anyhow!("registry unreachable"));
        }
        Ok(self.records.clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
