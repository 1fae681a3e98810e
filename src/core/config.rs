use crate::core::amount::Amount;
use crate::core::rate_store::{DEFAULT_CACHE_KEY, DEFAULT_STALENESS};
use crate::providers::{exchangerate_api, frankfurter};
use anyhow::{Context, Result, ensure};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Frankfurter,
    ExchangerateApi,
}

impl ProviderKind {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::Frankfurter => frankfurter::DEFAULT_BASE_URL,
            ProviderKind::ExchangerateApi => exchangerate_api::DEFAULT_BASE_URL,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    #[serde(default)]
    pub base_url: Option<String>,
}

impl ProviderConfig {
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.kind.default_base_url())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CacheConfig {
    #[serde(default = "default_cache_key")]
    pub key: String,
    #[serde(default = "default_staleness_secs")]
    pub staleness_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            key: default_cache_key(),
            staleness_secs: default_staleness_secs(),
        }
    }
}

fn default_cache_key() -> String {
    DEFAULT_CACHE_KEY.to_string()
}

fn default_staleness_secs() -> u64 {
    DEFAULT_STALENESS.as_secs()
}

fn default_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig {
            kind: ProviderKind::Frankfurter,
            base_url: None,
        },
        ProviderConfig {
            kind: ProviderKind::ExchangerateApi,
            base_url: None,
        },
    ]
}

fn default_update_interval_secs() -> u64 {
    60 * 60
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_auto_refresh() -> bool {
    true
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Tried in order; the first one that answers wins.
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderConfig>,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default = "default_update_interval_secs")]
    pub update_interval_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub default_amount: Amount,
    #[serde(default = "default_auto_refresh")]
    pub auto_refresh: bool,
    pub data_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            providers: default_providers(),
            cache: CacheConfig::default(),
            update_interval_secs: default_update_interval_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            default_amount: Amount::default(),
            auto_refresh: default_auto_refresh(),
            data_path: None,
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to built-in
    /// defaults when no file has been created there.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("com", "nprx", "nprx").context("Could not determine project directories")
    }

    pub fn default_config_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        Ok(Self::project_dirs()?.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.providers.is_empty(),
            "At least one rate provider must be configured"
        );
        ensure!(
            self.update_interval_secs > 0,
            "update_interval_secs must be greater than zero"
        );
        ensure!(
            self.cache.staleness_secs > 0,
            "cache.staleness_secs must be greater than zero"
        );
        ensure!(
            self.request_timeout_secs > 0,
            "request_timeout_secs must be greater than zero"
        );
        Ok(())
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_secs(self.update_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn staleness(&self) -> Duration {
        Duration::from_secs(self.cache.staleness_secs)
    }
}
