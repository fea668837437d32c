//! Configuration management for the benefits CLI
//!
//! Stores the API location and display settings in ~/.config/benefits/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

const CONFIG_DIR: &str = "benefits";
const CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding `base_url`
pub const BASE_URL_ENV: &str = "BENEFITS_API_URL";

/// CLI Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout for the HTTP store
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Currency label printed next to amounts
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_base_url() -> String {
    "http://localhost:8080/api/v1/beneficios".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_currency() -> String {
    "BRL".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            currency: default_currency(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| "Failed to parse config file")
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;

        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Apply `BENEFITS_API_URL` when set and non-empty
    pub fn with_env_overrides(self) -> Self {
        self.with_base_url_override(std::env::var(BASE_URL_ENV).ok())
    }

    fn with_base_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url;
        }
        self
    }

    /// Set the API base URL
    pub fn set_base_url(&mut self, url: String) {
        self.base_url = url.trim_end_matches('/').to_string();
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
