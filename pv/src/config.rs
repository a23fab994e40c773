//! Configuration types and loading

use eyre::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Planning service connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ServiceConfig {
    /// Base URL of the planning service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl ServiceConfig {
    /// Effective base URL: the `PLAN_SERVICE_URL` environment variable
    /// wins over the configured value when set and non-empty.
    pub fn base_url(&self) -> String {
        std::env::var("PLAN_SERVICE_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| self.base_url.clone())
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR). CLI flag wins.
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Config {
    /// Load config from an explicit path, the default locations, or fall
    /// back to defaults.
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            debug!(?config_path, "Config::load: explicit path");
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_yaml::from_str(&content)?;
            return Ok(config);
        }

        for candidate in Self::default_paths().iter().flatten() {
            if candidate.exists() {
                debug!(?candidate, "Config::load: found default location");
                let content = std::fs::read_to_string(candidate)?;
                let config: Config = serde_yaml::from_str(&content)?;
                return Ok(config);
            }
        }

        debug!("Config::load: no config file, using defaults");
        Ok(Config::default())
    }

    /// Read just the log level from the config file, for use before full
    /// config loading (logging has to come up first).
    pub fn load_log_level(path: Option<&PathBuf>) -> Option<String> {
        Self::load(path).ok().and_then(|config| config.log_level)
    }

    fn default_paths() -> [Option<PathBuf>; 2] {
        [
            dirs::config_dir().map(|p| p.join("planview").join("config.yml")),
            Some(PathBuf::from("planview.yml")),
        ]
    }
}
