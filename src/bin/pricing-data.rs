use std::path::PathBuf;

use anyhow::{Context, Result};
use carbondata::config::{default_config_path, ResolvedConfig};
use carbondata::prices::{CoinMarketCapClient, PriceExporter};
use carbondata::telemetry::init_tracing;
use clap::Parser;

#[derive(Parser)]
#[command(name = "pricing-data")]
#[command(about = "Fetch daily BCT and KLIMA closing prices into data/coin_price_ts.json")]
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

    let client = CoinMarketCapClient::new().with_base_url(config.prices.base_url.clone());
    let exporter = PriceExporter::new(
        &client,
        config.prices.assets.clone(),
        &config.price_output_path,
    );

    exporter.run().await?;
    Ok(())
}
