use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::prices::AssetEndpoint;

fn default_verra_base_url() -> String {
    "https://registry.verra.org".to_string()
}

fn default_verra_output_dir() -> PathBuf {
    PathBuf::from("/tmp")
}

fn default_program() -> String {
    "VCS".to_string()
}

fn default_issuance_type_codes() -> Vec<String> {
    vec!["ISSUE".to_string()]
}

fn default_prices_base_url() -> String {
    "https://api.coinmarketcap.com".to_string()
}

fn default_prices_output_path() -> PathBuf {
    PathBuf::from("data/coin_price_ts.json")
}

/// BCT and KLIMA priced in USD, in that order.
pub fn default_assets() -> Vec<AssetEndpoint> {
    vec![
        AssetEndpoint {
            symbol: "BCT".to_string(),
            id: 12949,
            convert_id: 2781,
            time_start: 1577932421,
            time_end: 1648604021,
        },
        AssetEndpoint {
            symbol: "KLIMA".to_string(),
            id: 12873,
            convert_id: 2781,
            time_start: 1577932421,
            time_end: 1648594800,
        },
    ]
}

/// Registry (issuance export) settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VerraConfig {
    /// Registry API root, without a trailing path.
    #[serde(default = "default_verra_base_url")]
    pub base_url: String,

    /// Directory receiving `verra_<date>.csv`.
    #[serde(default = "default_verra_output_dir")]
    pub output_dir: PathBuf,

    /// Registry program filter (e.g. "VCS").
    #[serde(default = "default_program")]
    pub program: String,

    /// Issuance type codes to request.
    #[serde(default = "default_issuance_type_codes")]
    pub issuance_type_codes: Vec<String>,

    /// Result offset sent as `$skip`. Only one page is ever requested.
    pub skip: u64,
}

impl Default for VerraConfig {
    fn default() -> Self {
        Self {
            base_url: default_verra_base_url(),
            output_dir: default_verra_output_dir(),
            program: default_program(),
            issuance_type_codes: default_issuance_type_codes(),
            skip: 0,
        }
    }
}

/// Market-data (price export) settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PricesConfig {
    /// Market-data API root, without a trailing path.
    #[serde(default = "default_prices_base_url")]
    pub base_url: String,

    /// Output JSON path. If relative, resolved from the data directory.
    #[serde(default = "default_prices_output_path")]
    pub output_path: PathBuf,

    /// Assets to fetch, in request order.
    #[serde(default = "default_assets")]
    pub assets: Vec<AssetEndpoint>,
}

impl Default for PricesConfig {
    fn default() -> Self {
        Self {
            base_url: default_prices_base_url(),
            output_path: default_prices_output_path(),
            assets: default_assets(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Path to the data root. If relative, resolved from config file location.
    /// If not specified, defaults to the config file's directory.
    pub data_dir: Option<PathBuf>,

    pub verra: VerraConfig,

    pub prices: PricesConfig,
}

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Resolve the data directory path.
    ///
    /// If `data_dir` is set and relative, it's resolved relative to `config_dir`.
    /// If `data_dir` is not set, returns `config_dir`.
    pub fn resolve_data_dir(&self, config_dir: &Path) -> PathBuf {
        match &self.data_dir {
            Some(data_dir) if data_dir.is_absolute() => data_dir.clone(),
            Some(data_dir) => config_dir.join(data_dir),
            None => config_dir.to_path_buf(),
        }
    }

    fn resolve(self, config_dir: &Path) -> ResolvedConfig {
        let data_dir = self.resolve_data_dir(config_dir);
        let price_output_path = if self.prices.output_path.is_absolute() {
            self.prices.output_path.clone()
        } else {
            data_dir.join(&self.prices.output_path)
        };

        ResolvedConfig {
            data_dir,
            price_output_path,
            verra: self.verra,
            prices: self.prices,
        }
    }
}

/// Loaded configuration with resolved paths.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The resolved data directory path.
    pub data_dir: PathBuf,

    /// Where the price store is written.
    pub price_output_path: PathBuf,

    pub verra: VerraConfig,

    pub prices: PricesConfig,
}

/// Root of this repository, fixed at build time.
pub fn repository_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Returns the default config file path.
///
/// Resolution order:
/// 1. `./carbondata.toml` if it exists in current directory
/// 2. `~/.local/share/carbondata/carbondata.toml` if it exists (XDG data directory)
/// 3. `./carbondata.toml`
pub fn default_config_path() -> PathBuf {
    let local_config = PathBuf::from("carbondata.toml");
    if local_config.exists() {
        return local_config;
    }

    if let Some(data_dir) = dirs::data_dir() {
        let xdg_config = data_dir.join("carbondata").join("carbondata.toml");
        if xdg_config.exists() {
            return xdg_config;
        }
    }

    local_config
}

impl ResolvedConfig {
    /// Load and resolve config from a file path.
    ///
    /// The data directory is resolved relative to the config file's parent directory.
    pub fn load(config_path: &Path) -> Result<Self> {
        let config_path = config_path
            .canonicalize()
            .with_context(|| format!("Config file not found: {}", config_path.display()))?;

        let config_dir = config_path
            .parent()
            .context("Config file has no parent directory")?;

        let config = Config::load(&config_path)?;
        Ok(config.resolve(config_dir))
    }

    /// Load config, falling back to defaults if the file doesn't exist.
    ///
    /// Without a file, the data directory is the repository root, whatever the
    /// current working directory is.
    pub fn load_or_default(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            return Self::load(config_path);
        }

        Ok(Config::default().resolve(&repository_root()))
    }
}
