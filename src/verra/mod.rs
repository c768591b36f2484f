//! Issuance export from the Verra carbon registry.

mod client;
mod exporter;
mod source;
mod table;

pub use client::VerraClient;
pub use exporter::{output_file_name, ExportSummary, IssuanceExporter};
pub use source::{IssuanceQuery, IssuanceRecord, IssuanceSource};
pub use table::IssuanceTable;
