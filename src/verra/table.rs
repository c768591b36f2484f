use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use super::source::IssuanceRecord;

/// Issuance records flattened into rows under a shared header.
///
/// Columns are the union of all record keys, in the order each key is first
/// seen. Records lacking a column leave that cell empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssuanceTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl IssuanceTable {
    pub fn from_records(records: &[IssuanceRecord]) -> Self {
        let mut seen = HashSet::new();
        let mut columns = Vec::new();
        for key in records.iter().flat_map(|record| record.keys()) {
            if seen.insert(key.as_str()) {
                columns.push(key.clone());
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| record.get(column).map(render_cell).unwrap_or_default())
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Writes the header row followed by every record. No index column.
    ///
    /// A table without columns is written as a single empty line.
    pub fn write_csv<W: Write>(&self, mut writer: W) -> Result<()> {
        if self.columns.is_empty() {
            writer.write_all(b"\n").context("Failed to write empty CSV")?;
            writer.flush().context("Failed to flush CSV output")?;
            return Ok(());
        }

        let mut writer = csv::Writer::from_writer(writer);
        writer
            .write_record(&self.columns)
            .context("Failed to write CSV header")?;
        for row in &self.rows {
            writer.write_record(row).context("Failed to write CSV row")?;
        }
        writer.flush().context("Failed to flush CSV output")?;
        Ok(())
    }

    /// Creates (or truncates) `path` and writes the table into it.
    pub fn write_csv_path(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        self.write_csv(std::io::BufWriter::new(file))
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

/// Renders one JSON value as CSV cell text.
fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
            value.to_string()
        }
    }
}
