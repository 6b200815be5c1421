//! Configuration management for ingame
//!
//! Config file location:
//! - Linux: ~/.config/ingame/config.toml
//! - macOS: ~/Library/Application Support/dev.ingame.ingame/config.toml
//! - Windows: %APPDATA%/ingame/ingame/config/config.toml
//!
//! You can override the config location by setting `INGAME_CONFIG_PATH`.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::Platform;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Catalog service configuration
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Search and paging behavior
    #[serde(default)]
    pub browse: BrowseConfig,
}

impl Config {
    /// Load configuration from file or create default
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

            let config: Config = toml::from_str(&content).with_context(|| {
                format!("Failed to parse config from {}", config_path.display())
            })?;

            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(config_path, toml)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("INGAME_CONFIG_PATH") {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Ok(PathBuf::from(trimmed));
            }
        }

        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// Directory the log file is written to.
    pub fn log_dir() -> Result<PathBuf> {
        Ok(project_dirs()?.data_local_dir().join("logs"))
    }

    /// Create default config file if it doesn't exist
    pub fn init() -> Result<Self> {
        let config = Self::load()?;

        let config_path = Self::config_path()?;
        if !config_path.exists() {
            config.save()?;
        }

        Ok(config)
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "ingame", "ingame").context("Could not determine project directories")
}

/// Catalog service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog API base URL; `/games?platform=<id>` is appended
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Optional proxy prefix the full request URL is appended to,
    /// e.g. `https://corsproxy.io/?`
    #[serde(default)]
    pub proxy_prefix: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Platform loaded at startup
    #[serde(default)]
    pub default_platform: Platform,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            proxy_prefix: None,
            timeout_seconds: default_timeout(),
            default_platform: Platform::default(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.freetogame.com/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Search and paging behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowseConfig {
    /// Games per result page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// How many extra suggestions "See more" reveals
    #[serde(default = "default_suggestion_step")]
    pub suggestion_step: usize,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            suggestion_step: default_suggestion_step(),
        }
    }
}

fn default_page_size() -> usize {
    15
}

fn default_suggestion_step() -> usize {
    5
}

/// Get configuration file path for display purposes
pub fn get_config_path() -> Result<String> {
    let path = Config::config_path()?;
    Ok(path.display().to_string())
}

/// Initialize configuration (load or create default)
pub fn init_config() -> Result<Config> {
    Config::init()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.catalog.base_url, "https://www.freetogame.com/api");
        assert_eq!(config.catalog.timeout_seconds, 30);
        assert!(config.catalog.proxy_prefix.is_none());
        assert_eq!(config.catalog.default_platform, Platform::Pc);
        assert_eq!(config.browse.page_size, 15);
        assert_eq!(config.browse.suggestion_step, 5);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();

        assert!(toml.contains("[catalog]"));
        assert!(toml.contains("base_url"));
        assert!(toml.contains("default_platform = \"pc\""));
        assert!(toml.contains("[browse]"));
        assert!(toml.contains("page_size"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "[catalog]\ndefault_platform = \"browser\"\nproxy_prefix = \"https://corsproxy.io/?\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.catalog.default_platform, Platform::Browser);
        assert_eq!(
            config.catalog.proxy_prefix.as_deref(),
            Some("https://corsproxy.io/?")
        );
        assert_eq!(config.catalog.timeout_seconds, 30);
        assert_eq!(config.browse.page_size, 15);
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.browse.page_size = 20;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.browse.page_size, 20);
    }

    #[test]
    fn test_missing_file_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.browse.suggestion_step, 5);
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[browse]\npage_size = \"lots\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err}").contains("Failed to parse config"));
    }
}
