//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Default vocabulary endpoint (research-theme taxonomy)
pub const DEFAULT_VOCAB_ENDPOINT: &str =
    "https://data.nist.gov/od/dm/nerdm-schema/pub/vocab/theme.json";

/// Default timeout for the vocabulary fetch, in seconds
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Endpoint serving the controlled vocabulary for the theme field
    pub vocab_endpoint: Option<String>,
    /// HTTP proxy as `host:port`; `None` means a direct connection
    pub proxy: Option<String>,
    /// Timeout for the vocabulary fetch, in seconds
    pub fetch_timeout_secs: Option<u64>,
    /// Export destination used when none is given on the command line
    pub default_export_path: Option<String>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("gov", "nist", "nerdm-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    /// Effective vocabulary endpoint
    pub fn vocab_endpoint(&self) -> &str {
        self.vocab_endpoint.as_deref().unwrap_or(DEFAULT_VOCAB_ENDPOINT)
    }

    /// Effective fetch timeout
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs.unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS))
    }

    /// Effective default export path
    pub fn export_path(&self) -> PathBuf {
        PathBuf::from(
            self.default_export_path
                .as_deref()
                .unwrap_or("record.json"),
        )
    }
}
