use std::path::PathBuf;

use anyhow::{Context, Result};
use carbondata::clock::SystemClock;
use carbondata::config::{default_config_path, ResolvedConfig};
use carbondata::telemetry::init_tracing;
use carbondata::verra::{IssuanceExporter, IssuanceQuery, VerraClient};
use clap::Parser;

#[derive(Parser)]
#[command(name = "download-verra-data")]
#[command(about = "Download Verra VCS issuance records to a dated CSV file")]
#[command(version, long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_COMMIT_HASH"), ")"))]
struct Cli {
    /// Path to config file (defaults apply when it does not exist)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config_path = cli.config.unwrap_or_else(default_config_path);
    let config = ResolvedConfig::load_or_default(&config_path)
        .with_context(|| format!("Failed to load config: {}", config_path.display()))?;

    let client = VerraClient::new().with_base_url(config.verra.base_url.clone());
    let exporter = IssuanceExporter::new(&client, &config.verra.output_dir)
        .with_query(IssuanceQuery::from(&config.verra))
        .with_progress(|line| println!("{line}"));

    exporter.run(&SystemClock).await?;
    Ok(())
}
