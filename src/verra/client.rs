//! Verra registry search client.
//!
//! The registry UI exposes an asset search endpoint that answers a POSTed
//! filter with `{"value": [ ...records... ]}`. Only the first page (selected
//! by `$skip`) is requested.

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::source::{IssuanceQuery, IssuanceRecord, IssuanceSource};
use crate::error::ApiError;
use crate::USER_AGENT;

const VERRA_BASE_URL: &str = "https://registry.verra.org";
const SEARCH_PATH: &str = "/uiapi/asset/asset/search";
const SERVICE: &str = "Verra";

#[derive(Debug, Clone)]
pub struct VerraClient {
    client: Client,
    base_url: String,
}

impl VerraClient {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            base_url: VERRA_BASE_URL.to_string(),
        }
    }

    /// Points the client at another registry root (e.g. a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn search_url(&self, skip: u64) -> String {
        format!("{}{SEARCH_PATH}?$skip={skip}&format=csv", self.base_url)
    }
}

impl Default for VerraClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Pulls the record list out of a search reply.
fn extract_records(body: Value) -> Result<Vec<IssuanceRecord>> {
    let missing = || ApiError::MissingField {
        service: SERVICE,
        field: "value",
    };

    let Value::Object(mut body) = body else {
        return Err(missing().into());
    };
    let Some(Value::Array(rows)) = body.remove("value") else {
        return Err(missing().into());
    };

    rows.into_iter()
        .enumerate()
        .map(|(idx, row)| match row {
            Value::Object(record) => Ok(record),
            other => Err(anyhow::anyhow!(
                "{SERVICE} record {idx} is not an object: {other}"
            )),
        })
        .collect()
}

#[async_trait::async_trait]
impl IssuanceSource for VerraClient {
    async fn search_issuances(&self, query: &IssuanceQuery) -> Result<Vec<IssuanceRecord>> {
        let url = self.search_url(query.skip);
        debug!(url = %url, program = %query.program, "Searching registry issuances");

        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .header("User-Agent", USER_AGENT)
            .json(query)
            .send()
            .await
            .with_context(|| format!("{SERVICE} search request failed"))?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(SERVICE, response).await.into());
        }

        let body: Value = response
            .json()
            .await
            .with_context(|| format!("{SERVICE} search response is not valid JSON"))?;

        extract_records(body)
    }

    fn name(&self) -> &str {
        "verra"
    }
}
