// Configuration types and loading

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Config file name, checked in the working directory and then the user config dir
pub const CONFIG_FILENAME: &str = "plugscope.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub health: HealthConfig,
    pub scoring: ScoringConfig,
    pub pipeline: PipelineConfig,
}

/// Catalog query API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Base URL for the directory API
    pub base_url: String,

    /// Results requested per search
    pub per_page: u32,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Attempts before a failure becomes terminal
    pub max_attempts: u32,

    /// First retry delay in milliseconds, doubled per attempt
    pub backoff_base_ms: u64,

    /// Upper bound on a single retry delay in milliseconds
    pub backoff_cap_ms: u64,

    /// How long a successful search stays cached
    pub cache_ttl_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.wordpress.org".to_string(),
            per_page: 50,
            timeout_secs: 10,
            max_attempts: 3,
            backoff_base_ms: 1000,
            backoff_cap_ms: 5000,
            cache_ttl_secs: 300,
        }
    }
}

impl CatalogConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

/// Per-item health detail settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Base URL for the plugin information API
    pub api_base_url: String,

    /// Base URL of the per-plugin support forum pages
    pub support_base_url: String,

    /// Timeout for each upstream request in seconds
    pub timeout_secs: u64,

    /// Pending lookups the service queue holds before callers wait
    pub channel_capacity: usize,

    /// How long a caller waits for a lookup reply
    pub reply_timeout_secs: u64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.wordpress.org".to_string(),
            support_base_url: "https://wordpress.org/support/plugin".to_string(),
            timeout_secs: 8,
            channel_capacity: 64,
            reply_timeout_secs: 10,
        }
    }
}

impl HealthConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn reply_timeout(&self) -> Duration {
        Duration::from_secs(self.reply_timeout_secs)
    }
}

/// Usability scoring parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Prior mean star rating across the directory
    pub global_mean: f64,

    /// Number of phantom average ratings mixed into every plugin
    pub confidence: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            global_mean: 3.8,
            confidence: 100.0,
        }
    }
}

/// Result paging settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub page_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { page_size: 48 }
    }
}

impl Config {
    /// Load config from an explicit path
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: Config = toml::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Discover and load config from standard locations.
    ///
    /// Search order:
    /// 1. `./plugscope.toml`
    /// 2. `<user config dir>/plugscope/plugscope.toml`
    ///
    /// Returns `Config::default()` if no config file is found.
    pub fn discover() -> Result<Self, ConfigError> {
        match find_config_file() {
            Some(path) => {
                debug!(path = %path.display(), "loading config");
                Self::load(&path)
            }
            None => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pipeline.page_size == 0 {
            return Err(ConfigError::Invalid {
                field: "pipeline.page_size",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(1.0..=5.0).contains(&self.scoring.global_mean) {
            return Err(ConfigError::Invalid {
                field: "scoring.global_mean",
                reason: format!("{} is outside 1..=5", self.scoring.global_mean),
            });
        }
        if !self.scoring.confidence.is_finite() || self.scoring.confidence < 0.0 {
            return Err(ConfigError::Invalid {
                field: "scoring.confidence",
                reason: format!("{} must be a non-negative number", self.scoring.confidence),
            });
        }
        if self.catalog.max_attempts == 0 {
            return Err(ConfigError::Invalid {
                field: "catalog.max_attempts",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.health.channel_capacity == 0 {
            warn!("health.channel_capacity is 0, using 1");
        }
        Ok(())
    }
}

fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILENAME);
    if local.exists() {
        return Some(local);
    }

    let dirs = directories::ProjectDirs::from("", "", "plugscope")?;
    let global = dirs.config_dir().join(CONFIG_FILENAME);
    global.exists().then_some(global)
}
