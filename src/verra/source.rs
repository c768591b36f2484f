use anyhow::Result;
use serde::Serialize;

use crate::config::VerraConfig;

/// One issuance row as returned by the registry.
///
/// The schema belongs to the registry, so fields are kept as raw JSON in the
/// order they were received.
pub type IssuanceRecord = serde_json::Map<String, serde_json::Value>;

/// Search filter posted to the registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuanceQuery {
    pub program: String,
    pub issuance_type_codes: Vec<String>,
    /// Sent as the `$skip` query parameter rather than in the body.
    #[serde(skip)]
    pub skip: u64,
}

impl IssuanceQuery {
    pub fn new(program: impl Into<String>, issuance_type_codes: Vec<String>) -> Self {
        Self {
            program: program.into(),
            issuance_type_codes,
            skip: 0,
        }
    }

    pub fn with_skip(mut self, skip: u64) -> Self {
        self.skip = skip;
        self
    }
}

impl Default for IssuanceQuery {
    /// All VCS issuances.
    fn default() -> Self {
        Self::new("VCS", vec!["ISSUE".to_string()])
    }
}

impl From<&VerraConfig> for IssuanceQuery {
    fn from(config: &VerraConfig) -> Self {
        Self::new(config.program.clone(), config.issuance_type_codes.clone())
            .with_skip(config.skip)
    }
}

#[async_trait::async_trait]
pub trait IssuanceSource: Send + Sync {
    /// Fetches one page of issuance records matching `query`.
    async fn search_issuances(&self, query: &IssuanceQuery) -> Result<Vec<IssuanceRecord>>;

    fn name(&self) -> &str;
}
