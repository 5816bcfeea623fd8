use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::filename::{is_safe_filename_component, ExtensionRule};
use crate::resolver::{self, Strategy};

/// User-Agent sent on every request; some JPX pages reject non-browser agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const DERIVATIVES_PAGE: &str =
    "https://www.jpx.co.jp/english/markets/derivatives/settlement-price/index.html";
const IRS_PAGE: &str = "https://www.jpx.co.jp/jscc/en/interest_rate_swap.html";

/// HTTP client parameters (optional `[http]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    /// Seconds allowed for the TCP/TLS connect phase.
    pub connect_timeout_secs: u64,
    /// Upper bound in seconds for a whole request, body included.
    pub timeout_secs: u64,
    /// Redirects followed before giving up.
    pub max_redirections: u32,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout_secs: 15,
            timeout_secs: 120,
            max_redirections: 10,
        }
    }
}

/// One `[[feeds]]` entry: source page, link heuristic and output naming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    pub name: String,
    pub page_url: String,
    /// Base for relative hrefs; derived from `page_url` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// Output directory, relative to `output_root` unless absolute.
    pub directory: PathBuf,
    pub prefix: String,
    pub strategy: Strategy,
    pub extension: ExtensionRule,
}

/// Global configuration loaded from `~/.config/jpxdl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JpxConfig {
    /// Root for feed directories (None = current directory).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_root: Option<PathBuf>,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default = "default_feeds")]
    pub feeds: Vec<FeedConfig>,
}

impl Default for JpxConfig {
    fn default() -> Self {
        Self {
            output_root: None,
            http: HttpConfig::default(),
            feeds: default_feeds(),
        }
    }
}

/// Problems found by [`JpxConfig::validate`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("feed with empty name")]
    EmptyName,
    #[error("duplicate feed name: {0}")]
    DuplicateFeed(String),
    #[error("feed {feed}: {field} must not be empty")]
    EmptyField { feed: String, field: &'static str },
    #[error("feed {feed}: prefix {prefix:?} is not usable in a filename")]
    UnsafePrefix { feed: String, prefix: String },
    #[error("feed {0}: strategy lists no extensions")]
    NoExtensions(String),
    #[error("feed {feed}: cannot derive origin from {page_url}")]
    BadOrigin { feed: String, page_url: String },
}

impl JpxConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for feed in &self.feeds {
            if feed.name.trim().is_empty() {
                return Err(ConfigError::EmptyName);
            }
            if !seen.insert(feed.name.as_str()) {
                return Err(ConfigError::DuplicateFeed(feed.name.clone()));
            }
            if feed.prefix.trim().is_empty() {
                return Err(ConfigError::EmptyField {
                    feed: feed.name.clone(),
                    field: "prefix",
                });
            }
            if !is_safe_filename_component(&feed.prefix) {
                return Err(ConfigError::UnsafePrefix {
                    feed: feed.name.clone(),
                    prefix: feed.prefix.clone(),
                });
            }
            if feed.directory.as_os_str().is_empty() {
                return Err(ConfigError::EmptyField {
                    feed: feed.name.clone(),
                    field: "directory",
                });
            }
            if feed.strategy.extensions().is_empty() {
                return Err(ConfigError::NoExtensions(feed.name.clone()));
            }
            if feed.origin.is_none() && resolver::origin_of(&feed.page_url).is_none() {
                return Err(ConfigError::BadOrigin {
                    feed: feed.name.clone(),
                    page_url: feed.page_url.clone(),
                });
            }
        }
        Ok(())
    }

    /// Feed by name.
    pub fn feed(&self, name: &str) -> Option<&FeedConfig> {
        self.feeds.iter().find(|f| f.name == name)
    }

    /// Directory that feed directories are joined onto.
    pub fn output_root(&self) -> PathBuf {
        self.output_root.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// The three JPX feeds: derivatives settlement prices, IRS statistics and
/// IRS daily settlement rates.
pub fn default_feeds() -> Vec<FeedConfig> {
    let irs_exts = vec![".pdf".to_string(), ".csv".to_string(), ".xls".to_string()];
    vec![
        FeedConfig {
            name: "settlement-prices".to_string(),
            page_url: DERIVATIVES_PAGE.to_string(),
            origin: None,
            strategy: Strategy::Direct {
                extensions: vec![".csv".to_string()],
            },
            directory: PathBuf::from("jpx_data"),
            prefix: "jpx_settlement_prices".to_string(),
            extension: ExtensionRule::fixed("csv"),
        },
        FeedConfig {
            name: "irs-statistics".to_string(),
            page_url: IRS_PAGE.to_string(),
            origin: None,
            strategy: Strategy::Anchored {
                marker: "Statistics of Interest Rate Swap".to_string(),
                extensions: irs_exts.clone(),
            },
            directory: PathBuf::from("irs_data"),
            prefix: "irs_statistics".to_string(),
            extension: ExtensionRule::from_url("xlsx", "xlsx", "xls"),
        },
        FeedConfig {
            name: "irs-settlement-rates".to_string(),
            page_url: IRS_PAGE.to_string(),
            origin: None,
            strategy: Strategy::Anchored {
                marker: "Settlement Rates for Interest Rate Swap(Daily)".to_string(),
                extensions: irs_exts,
            },
            directory: PathBuf::from("irs_data"),
            prefix: "irs_settlement_rates".to_string(),
            extension: ExtensionRule::from_url("csv", "csv", "pdf"),
        },
    ]
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("jpxdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<JpxConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = JpxConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load and validate configuration from an explicit path. Nothing is created.
pub fn load_from_path(path: &Path) -> Result<JpxConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: JpxConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
