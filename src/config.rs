//! Configuration management for Pitwall
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{
    CONFIG_GENERATED, DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_OPTIONS, DEFAULT_RELATIONS_PAGE_SIZE, ENV_API_URL,
};
use crate::models::EntityKind;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

/// Race server connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the server; `/api/...` paths are appended to it
    pub base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Page size used to fetch pilots and cars for dialog pickers
    pub relations_page_size: u32,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Tab shown on startup: "pilots", "cars" or "races"
    pub default_tab: String,
    /// Initial page size of every table
    pub page_size: u32,
    /// Page sizes cycled through with 's'
    pub page_size_options: Vec<u32>,
    /// Seconds before a status message disappears (0 = keep until replaced)
    pub status_timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write logs to a file
    pub enabled: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            request_timeout_secs: 10,
            relations_page_size: DEFAULT_RELATIONS_PAGE_SIZE,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_tab: "pilots".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            status_timeout_secs: 6,
        }
    }
}

impl UiConfig {
    /// Tab to open on startup
    pub fn default_kind(&self) -> EntityKind {
        EntityKind::parse(&self.default_tab).unwrap_or_default()
    }
}

impl Config {
    /// Load configuration from file or return defaults, then apply environment overrides
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        let mut config = if let Some(path) = config_path {
            Self::load_from_file(&path)?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var(ENV_API_URL) {
            config.apply_api_url_override(url)?;
        }

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Replace the server URL and re-validate
    pub fn apply_api_url_override(&mut self, url: String) -> Result<()> {
        self.api.base_url = url;
        self.validate()
            .with_context(|| format!("Invalid {} override", ENV_API_URL))
    }

    /// Find configuration file in order of precedence
    pub fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from("pitwall.toml");
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("pitwall").join("config.toml");
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            anyhow::bail!("api.base_url cannot be empty");
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            anyhow::bail!("api.base_url must start with http:// or https://, got '{}'", base_url);
        }
        if self.api.request_timeout_secs == 0 {
            anyhow::bail!("api.request_timeout_secs must be greater than 0");
        }
        if self.api.relations_page_size == 0 {
            anyhow::bail!("api.relations_page_size must be greater than 0");
        }

        if EntityKind::parse(&self.ui.default_tab).is_none() {
            anyhow::bail!(
                "ui.default_tab must be one of pilots, cars, races, got '{}'",
                self.ui.default_tab
            );
        }
        if self.ui.page_size_options.is_empty() {
            anyhow::bail!("ui.page_size_options cannot be empty");
        }
        if self.ui.page_size_options.contains(&0) {
            anyhow::bail!("ui.page_size_options cannot contain 0");
        }
        if !self.ui.page_size_options.contains(&self.ui.page_size) {
            anyhow::bail!(
                "ui.page_size {} is not one of page_size_options {:?}",
                self.ui.page_size,
                self.ui.page_size_options
            );
        }

        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Add header comment
        let header = format!(
            "# Pitwall Configuration File\n# Generated on {}\n\n",
            chrono::Local::now().format("%Y-%m-%d")
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join("pitwall"))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}
