use crate::core::portfolio::RefreshOptions;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
}

impl ProviderConfig {
    fn new(base_url: &str) -> Option<Self> {
        Some(Self {
            base_url: base_url.to_string(),
        })
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub yahoo: Option<ProviderConfig>,
    pub coincap: Option<ProviderConfig>,
    pub binance: Option<ProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            yahoo: ProviderConfig::new("https://query1.finance.yahoo.com"),
            coincap: ProviderConfig::new("https://api.coincap.io/v2"),
            binance: ProviderConfig::new("https://api.binance.com"),
        }
    }
}

impl ProvidersConfig {
    pub fn yahoo_url(&self) -> &str {
        self.yahoo
            .as_ref()
            .map_or("https://query1.finance.yahoo.com", |p| &p.base_url)
    }

    pub fn coincap_url(&self) -> &str {
        self.coincap
            .as_ref()
            .map_or("https://api.coincap.io/v2", |p| &p.base_url)
    }

    pub fn binance_url(&self) -> &str {
        self.binance
            .as_ref()
            .map_or("https://api.binance.com", |p| &p.base_url)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct RefreshConfig {
    pub lookup_timeout_secs: u64,
    /// Bound on a whole refresh pass; `None` disables it.
    pub deadline_secs: Option<u64>,
    pub max_concurrent_lookups: usize,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        RefreshConfig {
            lookup_timeout_secs: 10,
            deadline_secs: Some(30),
            max_concurrent_lookups: 4,
        }
    }
}

impl RefreshConfig {
    pub fn options(&self) -> RefreshOptions {
        RefreshOptions {
            lookup_timeout: Duration::from_secs(self.lookup_timeout_secs),
            deadline: self.deadline_secs.map(Duration::from_secs),
            max_concurrent_lookups: self.max_concurrent_lookups.max(1),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Scopes the saved portfolio.
    pub user: String,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    /// Fall back to built-in, possibly stale prices when every upstream fails.
    #[serde(default)]
    pub static_fallback: bool,
    pub data_path: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "pfolio", "pfolio")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("dev", "pfolio", "pfolio")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
