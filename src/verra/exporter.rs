use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use super::source::{IssuanceQuery, IssuanceSource};
use super::table::IssuanceTable;
use crate::clock::Clock;

/// File name for an export taken on `date_stamp` (`YYYY-MM-DD`).
pub fn output_file_name(date_stamp: &str) -> String {
    format!("verra_{date_stamp}.csv")
}

/// Outcome of one issuance export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub records: usize,
    pub columns: usize,
}

/// Downloads one page of registry issuances and writes it as a dated CSV.
pub struct IssuanceExporter<'a> {
    source: &'a dyn IssuanceSource,
    query: IssuanceQuery,
    output_dir: PathBuf,
    progress: Box<dyn Fn(&str) + Send + Sync + 'a>,
}

impl<'a> IssuanceExporter<'a> {
    pub fn new(source: &'a dyn IssuanceSource, output_dir: impl AsRef<Path>) -> Self {
        Self {
            source,
            query: IssuanceQuery::default(),
            output_dir: output_dir.as_ref().to_path_buf(),
            progress: Box::new(|_: &str| {}),
        }
    }

    pub fn with_query(mut self, query: IssuanceQuery) -> Self {
        self.query = query;
        self
    }

    /// Receives the human-readable progress lines.
    pub fn with_progress(mut self, progress: impl Fn(&str) + Send + Sync + 'a) -> Self {
        self.progress = Box::new(progress);
        self
    }

    /// Path the export would be written to on the clock's current UTC date.
    pub fn output_path(&self, clock: &dyn Clock) -> PathBuf {
        self.output_dir.join(output_file_name(&clock.date_stamp()))
    }

    pub async fn run(&self, clock: &dyn Clock) -> Result<ExportSummary> {
        let path = self.output_path(clock);

        (self.progress)("Downloading Verra transactions");
        let records = self.source.search_issuances(&self.query).await?;
        info!(
            source = self.source.name(),
            records = records.len(),
            skip = self.query.skip,
            "Fetched issuance records"
        );

        let table = IssuanceTable::from_records(&records);

        (self.progress)(&format!("Writing Verra transactions to {}", path.display()));
        std::fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "Failed to create output directory {}",
                self.output_dir.display()
            )
        })?;
        table.write_csv_path(&path)?;
        info!(path = %path.display(), records = records.len(), "Wrote issuance CSV");

        Ok(ExportSummary {
            path,
            records: records.len(),
            columns: table.columns().len(),
        })
    }
}
