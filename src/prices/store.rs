use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::models::ClosingSeries;

/// Per-asset closing series, serialized as `{"<SYMBOL>": {"<date>": close}}`.
///
/// Symbols keep their insertion order. Inserting a symbol that is already
/// present replaces its series in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceStore(IndexMap<String, ClosingSeries>);

impl PriceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: impl Into<String>, series: ClosingSeries) {
        self.0.insert(symbol.into(), series);
    }

    pub fn get(&self, symbol: &str) -> Option<&ClosingSeries> {
        self.0.get(symbol)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Reads a store previously written with [`PriceStore::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read price store: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse price store: {}", path.display()))
    }

    /// Overwrites `path` with the compact JSON form, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory {}", parent.display())
                })?;
            }
        }
        let content = serde_json::to_string(self).context("Failed to serialize price store")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write price store: {}", path.display()))
    }
}
